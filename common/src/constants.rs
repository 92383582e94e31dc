/// Number of axes in an accelerometer sample
pub const N_AXES: usize = 3;

/// Loopback port the accelerometer server listens on
pub const DEFAULT_SERVER_PORT: u16 = 12008;

/// Record terminator of the accelerometer stream
pub const RECORD_DELIMITER: char = '*';

/// Field separator of the accelerometer stream
pub const FIELD_SEPARATOR: char = ',';
