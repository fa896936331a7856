//! BME280寄存器地址

/// 温度/压力校准参数起始地址 (0x88-0xA1, 共26字节)
pub const CALIB_TP_START: u8 = 0x88;
/// 温度/压力校准参数长度（包含0xA0保留字节和0xA1的dig_H1）
pub const CALIB_TP_LEN: usize = 26;
/// 湿度校准参数起始地址 (0xE1-0xE7, 共7字节)
pub const CALIB_H_START: u8 = 0xE1;
/// 湿度校准参数长度
pub const CALIB_H_LEN: usize = 7;

/// 芯片ID寄存器
pub const CHIP_ID: u8 = 0xD0;
/// BME280的芯片ID
pub const BME280_CHIP_ID: u8 = 0x60;
/// 湿度采样配置寄存器
pub const CTRL_HUM: u8 = 0xF2;
/// 状态寄存器
pub const STATUS: u8 = 0xF3;
/// 状态寄存器: NVM数据正在复制到映像寄存器
pub const STATUS_IM_UPDATE: u8 = 0x01;
/// 温度、压力采样及工作模式配置寄存器
pub const CTRL_MEAS: u8 = 0xF4;
/// 待机时间、滤波器配置寄存器
pub const CONFIG: u8 = 0xF5;

/// 压力原始数据 (MSB, LSB, XLSB)
pub const PRESS_MSB: u8 = 0xF7;
pub const PRESS_LSB: u8 = 0xF8;
pub const PRESS_XLSB: u8 = 0xF9;
/// 温度原始数据 (MSB, LSB, XLSB)
pub const TEMP_MSB: u8 = 0xFA;
pub const TEMP_LSB: u8 = 0xFB;
pub const TEMP_XLSB: u8 = 0xFC;
/// 湿度原始数据 (MSB, LSB)
pub const HUM_MSB: u8 = 0xFD;
pub const HUM_LSB: u8 = 0xFE;
