use super::register::{CALIB_H_LEN, CALIB_TP_LEN};

/// BME280传感器校准参数结构体
///
/// 该结构体存储了从传感器 NVM 中读取的所有校准参数，用于
/// 温度、压力和湿度测量的补偿计算。
///
/// # 存储分布
/// - 温度/压力参数: 地址 0x88-0x9F (24字节)，0xA0保留
/// - 湿度参数: 地址 0xA1, 0xE1-0xE7 (1+7字节)
///
/// 实例只能通过 [`CalibrationData::decode`] 从两段完整的校准数据中构建，
/// 不存在部分填充的实例。加载后不可修改。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationData {
    // 温度校准参数组
    /// 温度校准系数 1 - 基准偏移量 (0x88-0x89)
    pub dig_t1: u16,
    /// 温度校准系数 2 - 一阶灵敏度系数 (0x8A-0x8B)
    pub dig_t2: i16,
    /// 温度校准系数 3 - 二阶非线性系数 (0x8C-0x8D)
    pub dig_t3: i16,

    // 压力校准参数组
    /// 压力校准系数 1 - 基准缩放系数 (0x8E-0x8F)
    pub dig_p1: u16,
    pub dig_p2: i16,
    pub dig_p3: i16,
    pub dig_p4: i16,
    pub dig_p5: i16,
    pub dig_p6: i16,
    pub dig_p7: i16,
    pub dig_p8: i16,
    /// 压力校准系数 9 (0x9E-0x9F)
    pub dig_p9: i16,

    // 湿度校准参数组
    /// 湿度校准系数 1 (0xA1)
    pub dig_h1: u8,
    /// 湿度校准系数 2 (0xE1-0xE2)
    pub dig_h2: i16,
    /// 湿度校准系数 3 (0xE3)
    pub dig_h3: u8,
    /// 湿度校准系数 4 - 0xE4[7:0] << 4 | 0xE5[3:0]
    pub dig_h4: i16,
    /// 湿度校准系数 5 - 0xE6[7:0] << 4 | 0xE5[7:4]
    pub dig_h5: i16,
    /// 湿度校准系数 6 (0xE7)
    pub dig_h6: i8,
}

impl CalibrationData {
    /// 解析校准数据
    ///
    /// ## 参数
    /// - `tp`: 从 0x88 开始连续读取的26字节
    /// - `hum`: 从 0xE1 开始连续读取的7字节
    ///
    /// 16位参数均为小端序。`dig_h4`/`dig_h5` 由跨字节的12位拼接而成，
    /// 按普通16位有符号整数处理，不额外做第11位的符号扩展。
    pub fn decode(tp: &[u8; CALIB_TP_LEN], hum: &[u8; CALIB_H_LEN]) -> Self {
        let le_u16 = |i: usize| u16::from_le_bytes([tp[i], tp[i + 1]]);
        let le_i16 = |i: usize| i16::from_le_bytes([tp[i], tp[i + 1]]);

        Self {
            dig_t1: le_u16(0),
            dig_t2: le_i16(2),
            dig_t3: le_i16(4),
            dig_p1: le_u16(6),
            dig_p2: le_i16(8),
            dig_p3: le_i16(10),
            dig_p4: le_i16(12),
            dig_p5: le_i16(14),
            dig_p6: le_i16(16),
            dig_p7: le_i16(18),
            dig_p8: le_i16(20),
            dig_p9: le_i16(22),
            // tp[24] 为保留字节 (0xA0)
            dig_h1: tp[25],
            dig_h2: i16::from_le_bytes([hum[0], hum[1]]),
            dig_h3: hum[2],
            dig_h4: (i16::from(hum[3]) << 4) | (i16::from(hum[4]) & 0x0F),
            dig_h5: (i16::from(hum[5]) << 4) | (i16::from(hum[4]) >> 4),
            dig_h6: hum[6] as i8,
        }
    }
}
