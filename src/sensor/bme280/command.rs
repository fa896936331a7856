//! 数字命令接口
//!
//! 沿用 Linux 字符设备 ioctl 的命令码约定 `_IOR('B', n, int)`，每条命令
//! 返回一个32位有符号整数或一个故障码。

use std::sync::Mutex;

use thiserror::Error;

use super::bus::ByteSource;
use super::dispatcher::{Bme280, HumiditySource, Reading, ReadingKind};
use super::error::{Bme280Error, Bme280Result};

/// 按 Linux `_IOR(type, nr, size)` 规则生成读命令码
const fn ior(ty: u8, nr: u8, size: u32) -> u32 {
    // 方向位 _IOC_READ = 2
    (2 << 30) | (size << 16) | ((ty as u32) << 8) | nr as u32
}

/// 读取温度，单位 0.01°C
pub const IOCTL_GET_TEMPERATURE: u32 = ior(b'B', 1, 4);
/// 读取湿度，单位 1/1024 %RH
pub const IOCTL_GET_HUMIDITY: u32 = ior(b'B', 2, 4);
/// 读取压力，单位 Pa
pub const IOCTL_GET_PRESSURE: u32 = ior(b'B', 3, 4);

impl TryFrom<u32> for ReadingKind {
    type Error = u32;

    fn try_from(cmd: u32) -> Result<Self, Self::Error> {
        match cmd {
            IOCTL_GET_TEMPERATURE => Ok(Self::Temperature),
            IOCTL_GET_HUMIDITY => Ok(Self::Humidity),
            IOCTL_GET_PRESSURE => Ok(Self::Pressure),
            other => Err(other),
        }
    }
}

impl ReadingKind {
    /// 对应的命令码
    pub fn command(self) -> u32 {
        match self {
            Self::Temperature => IOCTL_GET_TEMPERATURE,
            Self::Humidity => IOCTL_GET_HUMIDITY,
            Self::Pressure => IOCTL_GET_PRESSURE,
        }
    }
}

impl<S: ByteSource> Bme280<S> {
    /// 按命令码读取数据
    ///
    /// 命令码无效时返回 [`Bme280Error::UnsupportedCommand`]，不访问总线。
    pub fn dispatch(&mut self, cmd: u32) -> Bme280Result<Reading, S::Error> {
        let kind = ReadingKind::try_from(cmd).map_err(Bme280Error::UnsupportedCommand)?;
        self.read(kind)
    }
}

/// 命令执行故障
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// 初始化时读取校准数据失败 (EIO)
    #[error("传感器初始化失败")]
    Init,
    /// 读取原始数据失败 (EFAULT)
    #[error("读取传感器数据失败")]
    Io,
    /// 不支持的命令码 (EINVAL)
    #[error("不支持的命令: {0:#010x}")]
    UnsupportedCommand(u32),
    /// 设备锁已被污染 (EBUSY)
    #[error("设备繁忙")]
    Busy,
}

impl Fault {
    /// 负数形式的 errno
    pub fn errno(self) -> i32 {
        match self {
            Self::Init => -5,
            Self::Io => -14,
            Self::Busy => -16,
            Self::UnsupportedCommand(_) => -22,
        }
    }
}

impl<E: core::fmt::Debug> From<Bme280Error<E>> for Fault {
    fn from(err: Bme280Error<E>) -> Self {
        match err {
            Bme280Error::CalibrationRead(_) => Self::Init,
            Bme280Error::SampleRead(_) => Self::Io,
            Bme280Error::UnsupportedCommand(cmd) => Self::UnsupportedCommand(cmd),
        }
    }
}

/// 命令设备
///
/// 整个“读取原始数据 + 补偿”序列在互斥锁内完成，多线程调用互不干扰。
pub struct CommandDevice<S> {
    sensor: Mutex<Bme280<S>>,
}

impl<S: ByteSource> CommandDevice<S> {
    /// 加载校准数据并创建命令设备
    pub fn open(source: S, humidity_source: HumiditySource) -> Result<Self, Fault> {
        let sensor = Bme280::new(source)
            .map_err(|err| {
                log::error!("{}", err);
                Fault::from(err)
            })?
            .with_humidity_source(humidity_source);
        log::info!("BME280命令设备已就绪");
        Ok(Self::new(sensor))
    }

    pub fn new(sensor: Bme280<S>) -> Self {
        Self {
            sensor: Mutex::new(sensor),
        }
    }

    /// 执行一条命令
    pub fn ioctl(&self, cmd: u32) -> Result<i32, Fault> {
        let mut sensor = self.sensor.lock().map_err(|_| Fault::Busy)?;
        match sensor.dispatch(cmd) {
            Ok(reading) => Ok(reading.value()),
            Err(err) => {
                log::warn!("{}", err);
                Err(err.into())
            }
        }
    }
}
