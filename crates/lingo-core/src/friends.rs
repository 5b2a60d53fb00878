use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::{SessionClient, Transport};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Friend {
    pub username: String,
    pub id: u64,
    pub points: u64,
    pub avatar: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FollowingResponse {
    following: FollowingList,
}

#[derive(Debug, Deserialize)]
struct FollowingList {
    users: Vec<FollowedUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FollowedUser {
    username: String,
    user_id: u64,
    total_xp: u64,
    picture: Option<String>,
    display_name: Option<String>,
    is_following: bool,
}

/// Users the session's user follows.
pub fn fetch_friends<T: Transport>(client: &SessionClient<T>) -> Result<Vec<Friend>> {
    let url = client.config().following_url(client.user_id());
    let response: FollowingResponse = client.get_json(&url)?;

    Ok(response
        .following
        .users
        .into_iter()
        .filter(|user| user.is_following)
        .map(|user| Friend {
            username: user.username,
            id: user.user_id,
            points: user.total_xp,
            avatar: user.picture,
            display_name: user.display_name,
        })
        .collect())
}
