// error_handling.rs - Maps engine errors and warp rejections onto JSON error replies

use std::convert::Infallible;

use maze_engine::MazeError;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

#[derive(Debug)]
pub struct ServiceError {
    pub message: String,
    pub status_code: StatusCode,
}

impl warp::reject::Reject for ServiceError {}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    /// Opaque failure; details go to the log, not to the client.
    pub fn internal() -> Self {
        Self {
            message: "Internal Server Error".to_string(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Every engine error is a problem with the caller's input.
impl From<MazeError> for ServiceError {
    fn from(err: MazeError) -> Self {
        Self::bad_request(err.to_string())
    }
}

pub fn reject(err: impl Into<ServiceError>) -> Rejection {
    warp::reject::custom(err.into())
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(service_err) = err.find::<ServiceError>() {
        (service_err.status_code, service_err.message.clone())
    } else if let Some(body_err) = err.find::<BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid maze payload: {}", body_err))
    } else if let Some(query_err) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, format!("Invalid query: {}", query_err))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Expected application/json".to_string())
    } else {
        log::error!("unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
    };

    let json = warp::reply::json(&serde_json::json!({
        "error": message,
        "status_code": code.as_u16(),
    }));

    Ok(warp::reply::with_status(json, code))
}
