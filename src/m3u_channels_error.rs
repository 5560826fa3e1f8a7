use std::error::Error;
use std::fmt::{Display, Formatter, Result};

#[macro_export]
macro_rules! create_m3u_channels_error {
     ($kind: expr, $($arg:tt)*) => {
        $crate::m3u_channels_error::M3uChannelsError::new($kind, format!($($arg)*))
    }
}

#[macro_export]
macro_rules! create_m3u_channels_error_result {
     ($kind: expr, $($arg:tt)*) => {
        Err($crate::m3u_channels_error::M3uChannelsError::new($kind, format!($($arg)*)))
    }
}

#[macro_export]
macro_rules! notfound_err {
    ($($arg:tt)*) => {
        $crate::m3u_channels_error::M3uChannelsError::new($crate::m3u_channels_error::M3uChannelsErrorKind::NotFound, format!($($arg)*))
    }
}

pub use create_m3u_channels_error;
pub use create_m3u_channels_error_result;
pub use notfound_err;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum M3uChannelsErrorKind {
    Info,
    NotFound,
    Fetch,
}

#[derive(Debug)]
pub struct M3uChannelsError {
    pub kind: M3uChannelsErrorKind,
    pub message: String,
}

impl M3uChannelsError {
    pub const fn new(kind: M3uChannelsErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == M3uChannelsErrorKind::NotFound
    }
}

impl Display for M3uChannelsError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "M3uChannels error: {}", self.message)
    }
}

impl Error for M3uChannelsError {}

pub fn str_to_io_error(err: &str) -> std::io::Error {
    std::io::Error::other(err)
}
