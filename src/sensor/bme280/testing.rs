use super::bus::ByteSource;
use super::calibration::tests::reference_blocks;
use super::register;

/// 一次寄存器访问
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Block(u8, usize),
    Byte(u8),
    Word(u8),
}

/// 读取失败的寄存器地址
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeError(pub u8);

/// 内存中的寄存器映像，记录每次访问
pub struct FakeSource {
    regs: [u8; 256],
    fail: Option<u8>,
    log: Vec<Access>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            regs: [0u8; 256],
            fail: None,
            log: Vec::new(),
        }
    }

    /// 数据手册示例校准参数，温度 519888，压力 415148，湿度 30000
    pub fn reference() -> Self {
        let mut source = Self::new();
        let (tp, hum) = reference_blocks();
        source.set_block(register::CALIB_TP_START, &tp);
        source.set_block(register::CALIB_H_START, &hum);
        source.set_temperature(519888);
        source.set_triple(register::PRESS_MSB, 415148);
        source.set_block(register::HUM_MSB, &30000u16.to_be_bytes());
        source
    }

    pub fn set_block(&mut self, reg: u8, data: &[u8]) {
        let start = reg as usize;
        self.regs[start..start + data.len()].copy_from_slice(data);
    }

    pub fn set_temperature(&mut self, raw: u32) {
        self.set_triple(register::TEMP_MSB, raw);
    }

    fn set_triple(&mut self, reg: u8, raw: u32) {
        self.set_block(reg, &[(raw >> 12) as u8, (raw >> 4) as u8, (raw << 4) as u8]);
    }

    /// 之后对 `reg` 的访问均失败
    pub fn fail_at(&mut self, reg: u8) {
        self.fail = Some(reg);
    }

    pub fn log(&self) -> &[Access] {
        &self.log
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn access(&mut self, access: Access, reg: u8) -> Result<(), FakeError> {
        self.log.push(access);
        match self.fail {
            Some(fail) if fail == reg => Err(FakeError(reg)),
            _ => Ok(()),
        }
    }
}

impl ByteSource for FakeSource {
    type Error = FakeError;

    fn read_block(&mut self, reg: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.access(Access::Block(reg, buf.len()), reg)?;
        let start = reg as usize;
        buf.copy_from_slice(&self.regs[start..start + buf.len()]);
        Ok(())
    }

    fn read_byte(&mut self, reg: u8) -> Result<u8, Self::Error> {
        self.access(Access::Byte(reg), reg)?;
        Ok(self.regs[reg as usize])
    }

    fn read_word(&mut self, reg: u8) -> Result<u16, Self::Error> {
        self.access(Access::Word(reg), reg)?;
        let start = reg as usize;
        Ok(u16::from_le_bytes([self.regs[start], self.regs[start + 1]]))
    }
}
