use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use tracing::{error, info, warn};

/// One structured line per request, leveled by status class.
pub async fn access_log(
    request: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let method = request.method().to_string();
    let path = request.path().to_string();
    let peer = request
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("-")
        .to_string();

    let response = next.call(request).await?;
    let status = response.status().as_u16();

    if status >= 500 {
        error!(%method, %path, status, %peer, "request failed");
    } else if status >= 400 {
        warn!(%method, %path, status, %peer, "invalid request");
    } else {
        info!(%method, %path, status, %peer, "request processed");
    }

    Ok(response)
}
