use super::calibration::CalibrationData;
use super::sample::RawSample;

/// 温度补偿过程中产生的高精度中间值 `t_fine`
///
/// 压力和湿度补偿都依赖该值修正温度交叉敏感性，只能由
/// [`CalibrationData::compensate_temperature`] 产生，并显式传给后续计算。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermalState(i32);

impl ThermalState {
    #[cfg(test)]
    pub(crate) fn from_t_fine(t_fine: i32) -> Self {
        Self(t_fine)
    }

    pub fn t_fine(self) -> i32 {
        self.0
    }
}

/// 温度，单位 0.01°C（例如 2508 = 25.08°C）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperature(pub i32);

impl Temperature {
    pub fn celsius(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

/// 空气压力，单位 Pa
///
/// 0 表示补偿计算无定义（校准参数导致除数为0），不是有效读数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pressure(pub i32);

/// 相对湿度，单位 1/1024 %RH（Q22.10，范围 0..=102400）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Humidity(pub u32);

impl Humidity {
    /// 上限 100%RH
    pub const MAX: Humidity = Humidity(102400);

    pub fn percent(self) -> f32 {
        self.0 as f32 / 1024.0
    }
}

/// 湿度补偿中间值的上限 (100%RH << 22)
const HUMIDITY_CLAMP_MAX: i32 = 419430400;

/// 实现补偿计算
///
/// 全部为定点整数运算，右移均为算术右移（向负无穷取整），与数据手册
/// 4.2.3 节的参考实现逐位一致。可能超出位宽的乘法使用补码回绕，
/// 保证对任意输入都不会panic。
impl CalibrationData {
    /// 温度补偿
    ///
    /// ## 参数
    /// - `adc_t`: 从寄存器 0xFA-0xFC 读取的原始20位温度ADC值
    ///
    /// ## 返回
    /// - 补偿后的温度，以及供压力/湿度补偿使用的 [`ThermalState`]
    pub fn compensate_temperature(&self, adc_t: RawSample) -> (Temperature, ThermalState) {
        // 温度补偿运算在32位有符号整型下进行
        let adc_t = adc_t.value() as i32;
        let dig_t1 = i32::from(self.dig_t1);
        let dig_t2 = i32::from(self.dig_t2);
        let dig_t3 = i32::from(self.dig_t3);

        let var1 = ((adc_t >> 3) - (dig_t1 << 1)).wrapping_mul(dig_t2) >> 11;
        let delta = (adc_t >> 4) - dig_t1;
        let var2 = ((delta.wrapping_mul(delta) >> 12).wrapping_mul(dig_t3)) >> 14;

        let t_fine = var1.wrapping_add(var2);
        let temperature = (t_fine.wrapping_mul(5).wrapping_add(128)) >> 8;

        (Temperature(temperature), ThermalState(t_fine))
    }

    /// 压力补偿
    ///
    /// ## 参数
    /// - `adc_p`: 从寄存器 0xF7-0xF9 读取的原始20位压力ADC值
    /// - `thermal`: 同一次采集中温度补偿得到的 `t_fine`
    ///
    /// 中间值全部使用64位有符号整型，32位会在正常气压下溢出。
    pub fn compensate_pressure(&self, adc_p: RawSample, thermal: ThermalState) -> Pressure {
        let dig_p1 = i64::from(self.dig_p1);
        let dig_p2 = i64::from(self.dig_p2);
        let dig_p3 = i64::from(self.dig_p3);
        let dig_p4 = i64::from(self.dig_p4);
        let dig_p5 = i64::from(self.dig_p5);
        let dig_p6 = i64::from(self.dig_p6);
        let dig_p7 = i64::from(self.dig_p7);
        let dig_p8 = i64::from(self.dig_p8);
        let dig_p9 = i64::from(self.dig_p9);

        let mut var1 = i64::from(thermal.0) - 128000;
        let square = var1.wrapping_mul(var1);
        let mut var2 = square.wrapping_mul(dig_p6);
        var2 = var2.wrapping_add(var1.wrapping_mul(dig_p5) << 17);
        var2 = var2.wrapping_add(dig_p4 << 35);
        var1 = (square.wrapping_mul(dig_p3) >> 8).wrapping_add(var1.wrapping_mul(dig_p2) << 12);
        var1 = (1_i64 << 47).wrapping_add(var1).wrapping_mul(dig_p1) >> 33;

        // 避免除零
        if var1 == 0 {
            return Pressure(0);
        }

        let mut p = 1048576 - i64::from(adc_p.value());
        p = (p << 31).wrapping_sub(var2).wrapping_mul(3125).wrapping_div(var1);
        var1 = dig_p9.wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
        var2 = dig_p8.wrapping_mul(p) >> 19;
        p = (p.wrapping_add(var1).wrapping_add(var2) >> 8) + (dig_p7 << 4);

        // p 为 Q24.8 格式，除以256得到Pa
        Pressure((p as i32) / 256)
    }

    /// 湿度补偿
    ///
    /// ## 参数
    /// - `adc_h`: 从寄存器 0xFD-0xFE 读取的原始16位湿度ADC值
    /// - `thermal`: 同一次采集中温度补偿得到的 `t_fine`
    ///
    /// ## 返回
    /// - 1/1024 %RH，限制在 0..=102400
    ///
    /// 运算顺序不可调整，每次移位都会截断。
    pub fn compensate_humidity(&self, adc_h: RawSample, thermal: ThermalState) -> Humidity {
        let adc_h = adc_h.value() as i32;
        let dig_h1 = i32::from(self.dig_h1);
        let dig_h2 = i32::from(self.dig_h2);
        let dig_h3 = i32::from(self.dig_h3);
        let dig_h4 = i32::from(self.dig_h4);
        let dig_h5 = i32::from(self.dig_h5);
        let dig_h6 = i32::from(self.dig_h6);

        let x1 = thermal.0.wrapping_sub(76800);

        let scaled = ((adc_h << 14)
            .wrapping_sub(dig_h4 << 20)
            .wrapping_sub(dig_h5.wrapping_mul(x1))
            .wrapping_add(16384))
            >> 15;
        let thermal_term = (((x1.wrapping_mul(dig_h6) >> 10)
            .wrapping_mul((x1.wrapping_mul(dig_h3) >> 11) + 32768))
            >> 10)
            .wrapping_add(2097152);
        let sensitivity = thermal_term.wrapping_mul(dig_h2).wrapping_add(8192) >> 14;
        let mut x1 = scaled.wrapping_mul(sensitivity);

        let square = ((x1 >> 15).wrapping_mul(x1 >> 15)) >> 7;
        x1 = x1.wrapping_sub(square.wrapping_mul(dig_h1) >> 4);

        let x1 = x1.clamp(0, HUMIDITY_CLAMP_MAX);
        Humidity((x1 >> 12) as u32)
    }
}
