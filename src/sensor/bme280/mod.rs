//! BME280 温度、压力、湿度传感器
//!
//! - [`calibration`] / [`sample`]: 校准参数与原始采样数据解码
//! - [`compensation`]: 数据手册定点补偿公式
//! - [`dispatcher`]: 按读数种类完成“读取 + 补偿”
//! - [`command`]: ioctl 风格的数字命令接口
//! - [`bus`]: 寄存器字节源接口及 I2C 实现

pub mod bus;
pub mod calibration;
pub mod command;
pub mod compensation;
pub mod dispatcher;
pub mod error;
pub mod register;
pub mod sample;

#[cfg(test)]
mod testing;

pub use bus::{BusError, ByteSource, I2cByteSource};
pub use calibration::CalibrationData;
pub use command::{
    CommandDevice, Fault, IOCTL_GET_HUMIDITY, IOCTL_GET_PRESSURE, IOCTL_GET_TEMPERATURE,
};
pub use compensation::{Humidity, Pressure, Temperature, ThermalState};
pub use dispatcher::{Bme280, HumiditySource, Reading, ReadingKind};
pub use error::{Bme280Error, Bme280Result};
pub use sample::RawSample;
