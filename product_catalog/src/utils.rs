use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct Response<T> {
    pub status: String,
    pub message: T,
}

pub fn ser_to_str<T: Serialize>(t: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(t)
}

/// Status line plus JSON body, ready to be written to the socket.
#[derive(Debug, PartialEq)]
pub struct Reply {
    pub status: &'static str,
    pub body: String,
}

impl Reply {
    pub fn ok<T: Serialize>(status: &'static str, message: T) -> Result<Self, serde_json::Error> {
        let body = ser_to_str(&Response {
            status: String::from("ok"),
            message,
        })?;
        Ok(Self { status, body })
    }

    pub fn error(status: &'static str, message: &str) -> Self {
        let body = ser_to_str(&Response {
            status: String::from("error"),
            message,
        })
        .unwrap_or_default();
        Self { status, body }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("{}{}", self.status, self.body).into_bytes()
    }
}
