use anyhow::anyhow;
use catalog_auth::create_access_token;
use catalog_config::JwtConfig;
use catalog_core::{AppError, hash_password};
use catalog_models::{AuthResponse, ProfileChanges, UpdateProfileRequest, User, UserId, UserProfile};
use tracing::{debug, info, instrument, warn};

use crate::store::{DUPLICATE_EMAIL, UserStore};

const OWN_ADMIN_STATUS: &str = "You cannot change your own administrator status";

fn user_not_found() -> AppError {
    AppError::not_found(anyhow!("User not found"))
}

pub struct UserService;

impl UserService {
    #[instrument(skip(store), fields(user.id = %id))]
    pub async fn get_profile<S: UserStore + ?Sized>(
        store: &S,
        id: UserId,
    ) -> Result<UserProfile, AppError> {
        let user = store.find_user(id).await?.ok_or_else(user_not_found)?;
        Ok(UserProfile::from(&user))
    }

    /// Applies name, email and password changes to the caller's own account.
    ///
    /// `isAdmin` may be echoed back unchanged but never flipped.
    #[instrument(skip(store, jwt_config, current, dto), fields(user.id = %current.id))]
    pub async fn update_profile<S: UserStore + ?Sized>(
        store: &S,
        jwt_config: &JwtConfig,
        current: &User,
        dto: UpdateProfileRequest,
    ) -> Result<AuthResponse, AppError> {
        if let Some(is_admin) = dto.is_admin
            && is_admin != current.is_admin
        {
            warn!(requested = is_admin, "Attempt to change own administrator status");
            return Err(AppError::forbidden(OWN_ADMIN_STATUS.to_string()));
        }

        let email = dto.email.filter(|email| *email != current.email);
        if let Some(email) = &email
            && let Some(owner) = store.find_user_by_email(email).await?
            && owner.id != current.id
        {
            warn!("Profile update to an email already in use");
            return Err(AppError::bad_request(anyhow!(DUPLICATE_EMAIL)));
        }

        let changes = ProfileChanges {
            name: dto.name.map(|name| name.trim().to_string()),
            email,
            password_hash: dto.password.as_deref().map(hash_password).transpose()?,
        };

        let user = if changes.is_empty() {
            debug!("No profile fields changed");
            current.clone()
        } else {
            store
                .update_profile(current.id, &changes)
                .await?
                .ok_or_else(user_not_found)?
        };

        let token = create_access_token(user.id.into_inner(), jwt_config)?;
        info!(
            name_changed = changes.name.is_some(),
            email_changed = changes.email.is_some(),
            password_changed = changes.password_hash.is_some(),
            "Profile updated"
        );

        Ok(AuthResponse::new(&user, token))
    }

    /// Grants or revokes administrator status on another account.
    #[instrument(skip(store, actor), fields(actor.id = %actor.id))]
    pub async fn set_admin<S: UserStore + ?Sized>(
        store: &S,
        actor: &User,
        target: &str,
        is_admin: bool,
    ) -> Result<UserProfile, AppError> {
        let target: UserId = target
            .parse()
            .map_err(|_| AppError::bad_request(anyhow!("Invalid user id")))?;

        if target == actor.id {
            warn!("Administrator attempted to change own status");
            return Err(AppError::forbidden(OWN_ADMIN_STATUS.to_string()));
        }

        let user = store
            .set_admin(target, is_admin)
            .await?
            .ok_or_else(user_not_found)?;

        info!(user.id = %user.id, is_admin, "Administrator status changed");
        Ok(UserProfile::from(&user))
    }
}
