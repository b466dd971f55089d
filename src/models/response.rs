// JSON envelope returned by every /api route

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Error,
}

/// `{status, msg, data, data2}`. `data2` carries an optional secondary payload
/// (e.g. the sample timestamp next to a snapshot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T, U = ()> {
    pub status: Status,
    pub msg: String,
    pub data: Option<T>,
    pub data2: Option<U>,
}

impl<T, U> Response<T, U> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Status::Ok,
            msg: String::new(),
            data: Some(data),
            data2: None,
        }
    }

    pub fn ok_with(data: T, data2: U) -> Self {
        Self {
            status: Status::Ok,
            msg: String::new(),
            data: Some(data),
            data2: Some(data2),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            msg: msg.into(),
            data: None,
            data2: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
