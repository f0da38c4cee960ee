use actix_session::SessionExt;
use actix_web::{error::{ErrorForbidden, ErrorUnauthorized}, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::models::Role;
use crate::session_state::TypedSession;

// Extractor for any authenticated caller
pub struct SessionUser{
    pub user_id: Uuid,
    pub role: Role
}

// Extractor for MANAGER / ADMIN callers
pub struct Staff{
    pub user_id: Uuid,
    pub role: Role
}

// Extractor for ADMIN callers
pub struct AdminOnly(pub Uuid);

fn session_identity(req: &HttpRequest) -> Result<(Uuid, Role), actix_web::Error>{
    let session = TypedSession(req.get_session());

    let user_id = session.get_user_id()
        .map_err(|_| ErrorUnauthorized("Invalid session"))?;
    let role = session.get_role()
        .map_err(|_| ErrorUnauthorized("Invalid session"))?;

    match (user_id, role) {
        (Some(user_id), Some(role)) => Ok((user_id, role)),
        _ => Err(ErrorUnauthorized("Not logged in"))
    }
}

impl FromRequest for SessionUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            session_identity(req)
                .map(|(user_id, role)| SessionUser{user_id, role})
        )
    }
}

impl FromRequest for Staff {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            session_identity(req)
                .and_then(|(user_id, role)| {
                    if role.is_staff() {
                        Ok(Staff{user_id, role})
                    } else {
                        Err(ErrorForbidden("Insufficient role"))
                    }
                })
        )
    }
}

impl FromRequest for AdminOnly {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            session_identity(req)
                .and_then(|(user_id, role)| {
                    match role {
                        Role::Admin => Ok(AdminOnly(user_id)),
                        _ => Err(ErrorForbidden("Insufficient role"))
                    }
                })
        )
    }
}
