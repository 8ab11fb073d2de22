use log::info;

use kindling_domain::shared::{DomainError, UserId};
use kindling_domain::streak::StreakStateRepository;

use crate::application::dtos::UserStreakStatusDto;

/// Current streak status for a user. Users without any recorded
/// activity get a zero-valued record, never a not-found error.
pub async fn get_status(
    repo: &dyn StreakStateRepository,
    user_id: &str,
) -> Result<UserStreakStatusDto, DomainError> {
    let user = UserId::from_string(user_id);
    let state = repo.find_by_user(&user).await?;

    let dto = match state {
        Some(state) => UserStreakStatusDto::from_state(&state),
        None => UserStreakStatusDto::zero(user_id),
    };

    info!(
        "[streak] get_status user_id={} presence={} kindness={} response={} total_days={}",
        dto.user_id,
        dto.presence.count,
        dto.kindness.count,
        dto.response.count,
        dto.total_active_days
    );

    Ok(dto)
}
