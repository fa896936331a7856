/// 原始ADC采样值
///
/// - 温度/压力: 20位无符号数 (0..=0xFFFFF)
/// - 湿度: 16位无符号数 (0..=0xFFFF)
///
/// 每次读取时重新生成，不做保存。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample(u32);

impl RawSample {
    /// 由 MSB、LSB、XLSB 三个寄存器拼接20位数据，XLSB 低4位丢弃
    pub fn from_triple(msb: u8, lsb: u8, xlsb: u8) -> Self {
        Self((u32::from(msb) << 12) | (u32::from(lsb) << 4) | (u32::from(xlsb) >> 4))
    }

    /// 由湿度 MSB、LSB 两个寄存器拼接16位数据
    pub fn from_pair(msb: u8, lsb: u8) -> Self {
        Self((u32::from(msb) << 8) | u32::from(lsb))
    }

    /// 由一次16位宽读取得到的湿度数据构建
    ///
    /// `word` 需为寄存器原生顺序（高字节为 0xFD），
    /// 与 [`RawSample::from_pair`] 的结果一致。
    pub fn from_word(word: u16) -> Self {
        Self(u32::from(word))
    }

    /// 原始数值
    pub fn value(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triple_discards_low_nibble() {
        // 519888 = 0x7EED0
        assert_eq!(RawSample::from_triple(0x7E, 0xED, 0x0F).value(), 519888);
        assert_eq!(RawSample::from_triple(0x7E, 0xED, 0x00).value(), 519888);
        assert_eq!(RawSample::from_triple(0xFF, 0xFF, 0xFF).value(), 0xFFFFF);
        assert_eq!(RawSample::from_triple(0, 0, 0x10).value(), 1);
    }

    #[test]
    fn pair_and_word_agree() {
        assert_eq!(RawSample::from_pair(0x75, 0x30), RawSample::from_word(0x7530));
        assert_eq!(RawSample::from_pair(0xFF, 0xFF).value(), 0xFFFF);
    }
}
