use async_graphql::{Context, Object, Result, ResultExt, ID};

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, require_admin},
    graphql::helpers::{leaderboard_limit, parse_id},
    models::{
        domain::{HighScore, PlayerSession},
        dto::response::GameView,
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Highest scores first; defaults to the home screen size.
    async fn leaderboard(&self, ctx: &Context<'_>, limit: Option<i64>) -> Result<Vec<HighScore>> {
        let state = ctx.data::<AppState>()?;
        let limit = leaderboard_limit(limit, state.config.home_leaderboard_size);
        state.leaderboard_service.top(limit).await.extend()
    }

    async fn game(&self, ctx: &Context<'_>, id: ID) -> Result<GameView> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).extend()?;
        state.game_service.get_game(&id).await.extend()
    }

    async fn sessions(&self, ctx: &Context<'_>) -> Result<Vec<PlayerSession>> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).extend()?;
        require_admin(&claims).extend()?;

        state.session_service.list_sessions().await.extend()
    }

    async fn sessions_csv(&self, ctx: &Context<'_>) -> Result<String> {
        let state = ctx.data::<AppState>()?;
        let claims = extract_claims_from_context(ctx).extend()?;
        require_admin(&claims).extend()?;

        state.session_service.export_csv().await.extend()
    }
}
