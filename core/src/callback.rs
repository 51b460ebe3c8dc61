//! Completion callbacks for asynchronous calls.
//!
//! Both methods take `self` by value, so a callback can only ever be told
//! about one outcome. Any `FnOnce(Result<T, ClientError>)` closure is a
//! callback; implement the trait directly when the two outcomes are handled
//! by unrelated code.

use crate::error::ClientError;

pub trait ResponseCallback<T>: Send + 'static {
    fn on_success(self, data: T);

    fn on_fail(self, error: ClientError);
}

impl<T, F> ResponseCallback<T> for F
where
    F: FnOnce(Result<T, ClientError>) + Send + 'static,
{
    fn on_success(self, data: T) {
        self(Ok(data))
    }

    fn on_fail(self, error: ClientError) {
        self(Err(error))
    }
}

/// Route `outcome` to the matching callback method.
pub(crate) fn deliver<T, C: ResponseCallback<T>>(callback: C, outcome: Result<T, ClientError>) {
    match outcome {
        Ok(data) => callback.on_success(data),
        Err(error) => callback.on_fail(error),
    }
}
