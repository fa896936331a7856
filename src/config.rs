use std::{env, time::Duration};

use anyhow::Context;

use crate::sensor::bme280::HumiditySource;

/// 运行配置
///
/// 默认值适用于树莓派 I2C-1 总线上 SDO 接地的 BME280。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// I2C总线编号，树莓派通常为1
    pub i2c_bus: u8,
    /// I2C从设备地址
    pub i2c_addr: u8,
    /// 读取间隔
    pub interval: Duration,
    /// 等待传感器就绪的最长时间
    pub ready_timeout: Duration,
    /// 湿度原始数据读取方式
    pub humidity_source: HumiditySource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            i2c_bus: 1,
            i2c_addr: 0x76,
            interval: Duration::from_millis(1000),
            ready_timeout: Duration::from_millis(50),
            humidity_source: HumiditySource::BytePair,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    ///
    /// - `BME280_I2C_BUS`: 总线编号
    /// - `BME280_I2C_ADDR`: 从设备地址，支持十进制或 `0x` 前缀的十六进制
    /// - `BME280_INTERVAL_MS`: 读取间隔（毫秒）
    /// - `BME280_HUMIDITY_SOURCE`: `bytes` 或 `word`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup("BME280_I2C_BUS") {
            config.i2c_bus = value
                .trim()
                .parse()
                .with_context(|| format!("BME280_I2C_BUS 无效: {}", value))?;
        }
        if let Some(value) = lookup("BME280_I2C_ADDR") {
            config.i2c_addr =
                parse_u8(&value).with_context(|| format!("BME280_I2C_ADDR 无效: {}", value))?;
        }
        if let Some(value) = lookup("BME280_INTERVAL_MS") {
            let ms: u64 = value
                .trim()
                .parse()
                .with_context(|| format!("BME280_INTERVAL_MS 无效: {}", value))?;
            config.interval = Duration::from_millis(ms);
        }
        if let Some(value) = lookup("BME280_HUMIDITY_SOURCE") {
            config.humidity_source = match value.trim() {
                "bytes" => HumiditySource::BytePair,
                "word" => HumiditySource::Word,
                other => anyhow::bail!("BME280_HUMIDITY_SOURCE 无效: {}", other),
            };
        }

        Ok(config)
    }
}

/// 解析十进制或十六进制的8位整数
fn parse_u8(value: &str) -> anyhow::Result<u8> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16)?,
        None => value.parse()?,
    };
    Ok(parsed)
}
