use ::api::AError;
use ::config::ConfigError;

quick_error! {
    #[derive(Debug)]
    /// The main error object for the sync client.
    pub enum TError {
        Api(err: AError) {
            cause(err)
            display("api error: {}", err)
        }
        Config(err: ConfigError) {
            cause(err)
            display("config error: {}", err)
        }
        Json(err: serde_json::Error) {
            cause(err)
            display("json error: {}", err)
        }
    }
}

/// converts non-TError errors to TError, via the From trait. Handy in
/// map_err() calls where `?` can't infer the target type.
#[macro_export]
macro_rules! toterr {
    ($e:expr) => (
        {
            let err: $crate::error::TError = From::from($e);
            err
        }
    )
}

impl From<AError> for TError {
    fn from(err: AError) -> TError {
        TError::Api(err)
    }
}
impl From<ConfigError> for TError {
    fn from(err: ConfigError) -> TError {
        TError::Config(err)
    }
}
impl From<serde_json::Error> for TError {
    fn from(err: serde_json::Error) -> TError {
        TError::Json(err)
    }
}

pub type TResult<T> = Result<T, TError>;

impl TError {
    /// Whether this error happened on the wire (as opposed to config or
    /// serialization trouble on our end)
    pub fn is_transport(&self) -> bool {
        match *self {
            TError::Api(AError::Http(_)) => true,
            _ => false,
        }
    }
}
