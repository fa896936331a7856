use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use embedded_timers::clock::Clock;
use thiserror::Error;

use super::register;

/// 传感器寄存器字节读取接口
///
/// 补偿引擎只依赖该接口，不关心底层是I2C、SPI还是测试桩。
pub trait ByteSource {
    type Error: core::fmt::Debug;

    /// 从 `reg` 开始连续读取 `buf.len()` 个字节
    fn read_block(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// 读取单个寄存器
    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error>;

    /// 按 SMBus 字读取语义读取16位数据：`reg` 为低字节，`reg + 1` 为高字节
    fn read_word(&mut self, reg: u8) -> Result<u16, Self::Error>;
}

/// I2C字节源错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// 互斥锁已被污染，无法获取总线
    #[error("I2C通信总线繁忙")]
    Busy,
    /// I2C传输失败
    #[error("I2C传输失败: {0:?}")]
    Transfer(ErrorKind),
    /// 等待传感器就绪超时
    #[error("等待传感器就绪超时")]
    Timeout,
}

/// 基于 embedded-hal I2C 总线的字节源
///
/// 总线以 `Arc<Mutex<_>>` 形式共享，可同时挂载其他传感器。
pub struct I2cByteSource<I> {
    /// I2C通信句柄
    i2c_handle: Arc<Mutex<I>>,
    /// I2C从设备地址
    /// - BME280的地址通常为: 0x76 (SDO接地) 或 0x77
    i2c_addr: u8,
}

impl<I: I2c> I2cByteSource<I> {
    pub fn new(i2c_handle: Arc<Mutex<I>>, i2c_addr: u8) -> Self {
        Self {
            i2c_handle,
            i2c_addr,
        }
    }

    /// 写寄存器后读取数据
    fn write_read(&self, reg: u8, buf: &mut [u8]) -> Result<(), BusError> {
        // 获取I2C总线通信权限
        let mut i2c_handle_lock = self.i2c_handle.lock().map_err(|_| BusError::Busy)?;

        i2c_handle_lock
            .write_read(self.i2c_addr, &[reg], buf)
            .map_err(|err| BusError::Transfer(err.kind()))?;

        log::trace!("I2C读取 0x{:02X}: {:02X?}", reg, buf);
        Ok(())
    }

    /// 写单个寄存器
    fn write_register(&self, reg: u8, value: u8) -> Result<(), BusError> {
        let mut i2c_handle_lock = self.i2c_handle.lock().map_err(|_| BusError::Busy)?;

        i2c_handle_lock
            .write(self.i2c_addr, &[reg, value])
            .map_err(|err| BusError::Transfer(err.kind()))?;

        log::trace!("I2C写入 0x{:02X} = 0x{:02X}", reg, value);
        Ok(())
    }

    /// 读取芯片ID，BME280应为 0x60
    pub fn chip_id(&mut self) -> Result<u8, BusError> {
        self.read_byte(register::CHIP_ID)
    }

    /// 等待传感器将NVM校准数据复制到映像寄存器
    ///
    /// 上电或软复位后状态寄存器 0xF3 的第0位为1时，校准数据尚不可读。
    pub fn wait_ready<C>(&mut self, clock: &C, timeout: Duration) -> Result<(), BusError>
    where
        C: Clock,
        C::Instant: Copy,
    {
        let start = clock.now();
        loop {
            let status = self.read_byte(register::STATUS)?;
            if status & register::STATUS_IM_UPDATE == 0 {
                log::debug!("BME280就绪, 耗时 {:?}", clock.elapsed(start));
                return Ok(());
            }
            if clock.elapsed(start) >= timeout {
                return Err(BusError::Timeout);
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    /// 配置采样率并进入正常模式
    ///
    /// - 湿度采样率 osrs_h = 1x
    /// - 温度、压力采样率 osrs_t = 1x, osrs_p = 1x，正常模式
    /// - 滤波器关闭，待机时间 0.5ms
    ///
    /// ctrl_hum 需在 ctrl_meas 之前写入才会生效。
    pub fn start_normal_mode(&mut self) -> Result<(), BusError> {
        self.write_register(register::CTRL_HUM, 0x01)?;
        self.write_register(register::CTRL_MEAS, 0x27)?; // 00100111
        self.write_register(register::CONFIG, 0x00)?;
        log::debug!("BME280已进入正常模式");
        Ok(())
    }
}

impl<I: I2c> ByteSource for I2cByteSource<I> {
    type Error = BusError;

    fn read_block(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.write_read(reg, buf)
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error> {
        let mut data = [0u8; 1];
        self.write_read(reg, &mut data)?;
        Ok(data[0])
    }

    fn read_word(&mut self, reg: u8) -> Result<u16, Self::Error> {
        let mut data = [0u8; 2];
        self.write_read(reg, &mut data)?;
        Ok(u16::from_le_bytes(data))
    }
}
