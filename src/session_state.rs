use actix_session::{Session, SessionExt, SessionGetError, SessionInsertError};
use actix_web::FromRequest;
use futures_util::future::{ready, Ready};
use uuid::Uuid;

use crate::models::Role;

pub struct TypedSession(pub Session);

const USER_ID_KEY: &str = "user_id";
const ROLE_KEY: &str = "role";
const NAME_KEY: &str = "name";
const AVATAR_KEY: &str = "avatar";

impl TypedSession {
    // Written on successful login, after renewing the session id
    pub fn log_in(
        &self,
        user_id: Uuid,
        role: Role,
        display_name: &str,
        avatar: &str
    ) -> Result<(), SessionInsertError>{
        self.0.insert(USER_ID_KEY, user_id.to_string())?;
        self.0.insert(ROLE_KEY, role.as_str())?;
        self.0.insert(NAME_KEY, display_name)?;
        self.0.insert(AVATAR_KEY, avatar)?;
        Ok(())
    }

    pub fn get_user_id(&self) -> Result<Option<Uuid>, SessionGetError>{
        let raw = self.0.get::<String>(USER_ID_KEY)?;
        Ok(raw.and_then(|value| Uuid::parse_str(&value).ok()))
    }

    pub fn get_role(&self) -> Result<Option<Role>, SessionGetError>{
        let raw = self.0.get::<String>(ROLE_KEY)?;
        Ok(raw.and_then(|value| Role::parse(&value).ok()))
    }

    pub fn get_display_name(&self) -> Result<Option<String>, SessionGetError>{
        self.0.get(NAME_KEY)
    }

    pub fn renew(&self){
        self.0.renew();
    }

    pub fn purge(&self){
        self.0.purge();
    }
}

impl FromRequest for TypedSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let session = req.get_session();
        ready(Ok(TypedSession(session)))
    }
}
