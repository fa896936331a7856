use super::bus::ByteSource;
use super::calibration::CalibrationData;
use super::compensation::{Humidity, Pressure, Temperature, ThermalState};
use super::error::{Bme280Error, Bme280Result};
use super::register::{self, CALIB_H_LEN, CALIB_TP_LEN};
use super::sample::RawSample;

/// 读数种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingKind {
    Temperature,
    Humidity,
    Pressure,
}

/// 湿度原始数据的读取方式
///
/// 每种方式都与对应的解码规则配对，两者得到相同的原始值。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HumiditySource {
    /// 分别读取 0xFD (MSB) 和 0xFE (LSB) 两个寄存器
    #[default]
    BytePair,
    /// 从 0xFD 进行一次 SMBus 字读取（低字节在前），交换字节后解码
    Word,
}

/// 带单位标记的补偿结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// 0.01°C
    Temperature(Temperature),
    /// Pa
    Pressure(Pressure),
    /// 1/1024 %RH
    Humidity(Humidity),
}

impl Reading {
    /// 对外接口使用的32位有符号整数
    pub fn value(self) -> i32 {
        match self {
            Self::Temperature(Temperature(v)) => v,
            Self::Pressure(Pressure(v)) => v,
            // 最大 102400，不会溢出
            Self::Humidity(Humidity(v)) => v as i32,
        }
    }

    pub fn kind(self) -> ReadingKind {
        match self {
            Self::Temperature(_) => ReadingKind::Temperature,
            Self::Pressure(_) => ReadingKind::Pressure,
            Self::Humidity(_) => ReadingKind::Humidity,
        }
    }
}

/// BME280 传感器实例
///
/// 持有字节源和一次成功加载的校准参数。每次压力或湿度请求都会
/// 先在同一序列中读取并补偿温度，`t_fine` 按值传递，不保存在实例中。
pub struct Bme280<S> {
    source: S,
    calibration: CalibrationData,
    humidity_source: HumiditySource,
}

impl<S: ByteSource> Bme280<S> {
    /// 创建传感器实例，校准数据读取失败时直接返回错误
    pub fn new(mut source: S) -> Bme280Result<Self, S::Error> {
        let calibration = Self::load_calibration(&mut source)?;
        Ok(Self {
            source,
            calibration,
            humidity_source: HumiditySource::default(),
        })
    }

    /// 设置湿度原始数据读取方式
    pub fn with_humidity_source(mut self, humidity_source: HumiditySource) -> Self {
        self.humidity_source = humidity_source;
        self
    }

    pub fn calibration(&self) -> &CalibrationData {
        &self.calibration
    }

    /// 重新读取校准数据（例如软复位之后）
    ///
    /// 失败时保留原有的校准参数。
    pub fn reload_calibration(&mut self) -> Bme280Result<(), S::Error> {
        self.calibration = Self::load_calibration(&mut self.source)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn load_calibration(source: &mut S) -> Bme280Result<CalibrationData, S::Error> {
        let mut tp = [0u8; CALIB_TP_LEN];
        source
            .read_block(register::CALIB_TP_START, &mut tp)
            .map_err(Bme280Error::CalibrationRead)?;

        let mut hum = [0u8; CALIB_H_LEN];
        source
            .read_block(register::CALIB_H_START, &mut hum)
            .map_err(Bme280Error::CalibrationRead)?;

        Ok(CalibrationData::decode(&tp, &hum))
    }

    /// 读取并补偿指定种类的数据
    pub fn read(&mut self, kind: ReadingKind) -> Bme280Result<Reading, S::Error> {
        match kind {
            ReadingKind::Temperature => {
                let (temperature, _) = self.read_temperature()?;
                Ok(Reading::Temperature(temperature))
            }
            ReadingKind::Pressure => {
                let (_, thermal) = self.read_temperature()?;
                let raw = self.read_triple(
                    register::PRESS_MSB,
                    register::PRESS_LSB,
                    register::PRESS_XLSB,
                )?;
                Ok(Reading::Pressure(self.calibration.compensate_pressure(raw, thermal)))
            }
            ReadingKind::Humidity => {
                let (_, thermal) = self.read_temperature()?;
                let raw = self.read_humidity_raw()?;
                Ok(Reading::Humidity(self.calibration.compensate_humidity(raw, thermal)))
            }
        }
    }

    /// 读取温度，同时返回供后续补偿使用的 `t_fine`
    pub fn read_temperature(&mut self) -> Bme280Result<(Temperature, ThermalState), S::Error> {
        let raw = self.read_triple(register::TEMP_MSB, register::TEMP_LSB, register::TEMP_XLSB)?;
        Ok(self.calibration.compensate_temperature(raw))
    }

    fn read_triple(&mut self, msb: u8, lsb: u8, xlsb: u8) -> Bme280Result<RawSample, S::Error> {
        let msb = self.source.read_byte(msb).map_err(Bme280Error::SampleRead)?;
        let lsb = self.source.read_byte(lsb).map_err(Bme280Error::SampleRead)?;
        let xlsb = self.source.read_byte(xlsb).map_err(Bme280Error::SampleRead)?;
        Ok(RawSample::from_triple(msb, lsb, xlsb))
    }

    fn read_humidity_raw(&mut self) -> Bme280Result<RawSample, S::Error> {
        match self.humidity_source {
            HumiditySource::BytePair => {
                let msb = self
                    .source
                    .read_byte(register::HUM_MSB)
                    .map_err(Bme280Error::SampleRead)?;
                let lsb = self
                    .source
                    .read_byte(register::HUM_LSB)
                    .map_err(Bme280Error::SampleRead)?;
                Ok(RawSample::from_pair(msb, lsb))
            }
            HumiditySource::Word => {
                // SMBus字读取把 0xFD 放在低字节，而 0xFD 是湿度的高字节
                let word = self
                    .source
                    .read_word(register::HUM_MSB)
                    .map_err(Bme280Error::SampleRead)?;
                Ok(RawSample::from_word(word.swap_bytes()))
            }
        }
    }
}
