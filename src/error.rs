//! Error kinds.
//!
//! Creative input is never an error: a packer that finds no room returns fewer circles, a ring
//! with nonsensical options draws nothing visible. [`ErrorKind`] is reserved for configuration
//! that can not mean anything, such as negative radii or an empty sampling region, and for
//! the I/O of the optional raster backend.
//!
//! Errors travel as [`anyhow::Error`]; match on the kind with `err.downcast_ref::<ErrorKind>()`.

#[derive(Debug)]
pub enum ErrorKind {
  InvalidConfig(String),
  IoError(std::io::Error),
  #[cfg(feature = "image")]
  ImageError(image::ImageError),
}

impl From<std::io::Error> for ErrorKind {
  fn from(e: std::io::Error) -> Self {
    ErrorKind::IoError(e)
  }
}
#[cfg(feature = "image")]
impl From<image::ImageError> for ErrorKind {
  fn from(e: image::ImageError) -> Self {
    match e {
      image::ImageError::IoError(e) => ErrorKind::IoError(e),
      e => ErrorKind::ImageError(e)
    }
  }
}

impl ::std::fmt::Display for ErrorKind {
  fn fmt(&self, fmt: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
    use ErrorKind::*;
    match *self {
      InvalidConfig(ref s) => write!(fmt, "invalid configuration: {}", s),
      IoError(ref err) => write!(fmt, "{}", err),
      #[cfg(feature = "image")]
      ImageError(ref err) => write!(fmt, "{}", err),
    }
  }
}

impl ::std::error::Error for ErrorKind {
  fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
    match *self {
      ErrorKind::IoError(ref err) => Some(err),
      #[cfg(feature = "image")]
      ErrorKind::ImageError(ref err) => Some(err),
      _ => None
    }
  }
}

/// Shorthand for `Err(ErrorKind::InvalidConfig(..))`.
pub(crate) fn invalid_config<T>(msg: impl Into<String>) -> Result<T> {
  Err(ErrorKind::InvalidConfig(msg.into()).into())
}

/// Convenient wrapper around `std::Result`.
pub type Result<T> = anyhow::Result<T>;
