use std::sync::{Arc, Mutex};

use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use raspi_bme280::sensor::bme280::{
    Bme280, CalibrationData, CommandDevice, HumiditySource, I2cByteSource, IOCTL_GET_HUMIDITY,
    IOCTL_GET_TEMPERATURE, RawSample, Reading, ReadingKind, Temperature,
};

const ADDR: u8 = 0x76;

/// 数据手册示例的温度/压力校准块 (0x88-0xA1)
const TP_BLOCK: [u8; 26] = [
    0x70, 0x6B, // T1 = 27504
    0x43, 0x67, // T2 = 26435
    0x18, 0xFC, // T3 = -1000
    0x7D, 0x8E, // P1 = 36477
    0x43, 0xD6, // P2 = -10685
    0xD0, 0x0B, // P3 = 3024
    0x27, 0x0B, // P4 = 2855
    0x8C, 0x00, // P5 = 140
    0xF9, 0xFF, // P6 = -7
    0x8C, 0x3C, // P7 = 15500
    0xF8, 0xC6, // P8 = -14600
    0x70, 0x17, // P9 = 6000
    0x00, // 保留
    0x4B, // H1 = 75
];

/// 湿度校准块 (0xE1-0xE7): H2 = 362, H3 = 0, H4 = 313, H5 = 50, H6 = 30
const H_BLOCK: [u8; 7] = [0x6A, 0x01, 0x00, 0x13, 0x29, 0x03, 0x1E];

fn calibration_reads() -> Vec<I2cTransaction> {
    vec![
        I2cTransaction::write_read(ADDR, vec![0x88], TP_BLOCK.to_vec()),
        I2cTransaction::write_read(ADDR, vec![0xE1], H_BLOCK.to_vec()),
    ]
}

fn byte(reg: u8, value: u8) -> I2cTransaction {
    I2cTransaction::write_read(ADDR, vec![reg], vec![value])
}

/// 温度原始值 519888 = 0x7EED0
fn temperature_reads() -> Vec<I2cTransaction> {
    vec![byte(0xFA, 0x7E), byte(0xFB, 0xED), byte(0xFC, 0x00)]
}

#[test]
fn decoded_block_matches_datasheet() {
    let calib = CalibrationData::decode(&TP_BLOCK, &H_BLOCK);

    assert_eq!(calib.dig_t1, 27504);
    assert_eq!(calib.dig_t3, -1000);
    assert_eq!(calib.dig_p6, -7);
    assert_eq!(calib.dig_p8, -14600);
    assert_eq!(calib.dig_h1, 75);
    assert_eq!(calib.dig_h4, 313);
    assert_eq!(calib.dig_h5, 50);

    let (temperature, thermal) = calib.compensate_temperature(RawSample::from_triple(0x7E, 0xED, 0x00));
    assert_eq!(temperature, Temperature(2508));
    assert_eq!(thermal.t_fine(), 128422);
    // 415148 = 0x655AC
    let pressure = calib.compensate_pressure(RawSample::from_triple(0x65, 0x5A, 0xC0), thermal);
    assert_eq!(pressure.0, 100653);
}

#[test]
fn sensor_over_i2c_mock() {
    let mut expectations = calibration_reads();
    expectations.extend(temperature_reads());
    expectations.extend(temperature_reads());
    // 压力原始值 415148 = 0x655AC
    expectations.extend([byte(0xF7, 0x65), byte(0xF8, 0x5A), byte(0xF9, 0xC0)]);

    let i2c = I2cMock::new(&expectations);
    let mut handle = i2c.clone();
    let source = I2cByteSource::new(Arc::new(Mutex::new(i2c)), ADDR);
    let mut sensor = Bme280::new(source).unwrap();

    assert_eq!(
        sensor.read(ReadingKind::Temperature).unwrap(),
        Reading::Temperature(Temperature(2508))
    );
    assert_eq!(sensor.read(ReadingKind::Pressure).unwrap().value(), 100653);

    handle.done();
}

#[test]
fn command_device_over_i2c_mock() {
    let mut expectations = calibration_reads();
    expectations.extend(temperature_reads());
    // 湿度原始值 30000 = 0x7530，SMBus字读取低字节在前
    expectations.push(I2cTransaction::write_read(ADDR, vec![0xFD], vec![0x75, 0x30]));
    expectations.extend(temperature_reads());

    let i2c = I2cMock::new(&expectations);
    let mut handle = i2c.clone();
    let source = I2cByteSource::new(Arc::new(Mutex::new(i2c)), ADDR);
    let device = CommandDevice::open(source, HumiditySource::Word).unwrap();

    assert_eq!(device.ioctl(IOCTL_GET_HUMIDITY), Ok(56317));
    assert!(device.ioctl(0x1234).is_err());
    assert_eq!(device.ioctl(IOCTL_GET_TEMPERATURE), Ok(2508));

    handle.done();
}
