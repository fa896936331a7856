//! BME280 错误类型
//!
//! 对底层总线错误类型保持泛型，由调用方决定如何处理。

use core::fmt::Debug;

use thiserror::Error;

/// BME280 补偿引擎可能产生的全部错误
#[derive(Debug, Error)]
pub enum Bme280Error<E: Debug> {
    /// 读取校准数据失败，传感器实例不可用
    #[error("读取校准数据失败: {0:?}")]
    CalibrationRead(E),

    /// 读取原始采样数据失败，仅影响本次请求
    #[error("读取原始采样数据失败: {0:?}")]
    SampleRead(E),

    /// 不支持的命令码
    #[error("不支持的命令: {0:#010x}")]
    UnsupportedCommand(u32),
}

pub type Bme280Result<T, E> = Result<T, Bme280Error<E>>;
