//! Route filters

use crate::handlers;
use crate::reply::{self, Unauthorized};
use crate::state::AppState;
use pokebox_core::{Identity, TokenAuthority};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, Rejection, Reply};

/// Largest accepted request body
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Every route, with rejections recovered into error bodies
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    catalog(state.clone())
        .or(auth(state.clone()))
        .or(collection(state))
        .with(warp::trace::request())
        .recover(reply::recover)
}

fn catalog(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let one = warp::path!("pokemon" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_creature);

    let page = warp::path!("pokemon")
        .and(warp::get())
        .and(warp::query::<HashMap<String, String>>())
        .and(with_state(state))
        .and_then(handlers::list_creatures);

    one.or(page)
}

fn auth(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("auth" / "token")
        .and(warp::post())
        .and(json_body::<handlers::TokenRequest>())
        .and(with_state(state))
        .and_then(handlers::issue_token)
}

fn collection(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let authority = state.authority.clone();

    let list = warp::path!("box")
        .and(warp::get())
        .and(with_identity(authority.clone()))
        .and(with_state(state.clone()))
        .and_then(handlers::list_entries);

    let create = warp::path!("box")
        .and(warp::post())
        .and(with_identity(authority.clone()))
        .and(json_body::<Value>())
        .and(with_state(state.clone()))
        .and_then(handlers::create_entry);

    let clear = warp::path!("box")
        .and(warp::delete())
        .and(with_identity(authority.clone()))
        .and(with_state(state.clone()))
        .and_then(handlers::clear_entries);

    let get = warp::path!("box" / String)
        .and(warp::get())
        .and(with_identity(authority.clone()))
        .and(with_state(state.clone()))
        .and_then(handlers::get_entry);

    let update = warp::path!("box" / String)
        .and(warp::put())
        .and(with_identity(authority.clone()))
        .and(json_body::<Value>())
        .and(with_state(state.clone()))
        .and_then(handlers::update_entry);

    let delete = warp::path!("box" / String)
        .and(warp::delete())
        .and(with_identity(authority))
        .and(with_state(state))
        .and_then(handlers::delete_entry);

    list.or(create)
        .or(clear)
        .or(get)
        .or(update)
        .or(delete)
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Verified identity from the `Authorization` header
fn with_identity(
    authority: Arc<TokenAuthority>,
) -> impl Filter<Extract = (Identity,), Error = Rejection> + Clone {
    warp::header::optional::<String>("authorization").and_then(move |header: Option<String>| {
        let authority = authority.clone();
        async move {
            authority
                .verify(header.as_deref())
                .map_err(|e| warp::reject::custom(Unauthorized(e)))
        }
    })
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
where
    T: DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}
