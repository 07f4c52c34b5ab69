use ::url::ParseError;

quick_error! {
    #[derive(Debug)]
    /// Anything that can go wrong while talking HTTP.
    pub enum AError {
        Http(err: reqwest::Error) {
            cause(err)
            display("api: http error: {}", err)
            from()
        }
        BadEndpoint(err: ParseError) {
            cause(err)
            display("api: bad endpoint: {}", err)
            from()
        }
    }
}

pub type AResult<T> = Result<T, AError>;
