use async_graphql::{Context, Object, Result, ResultExt, ID};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    graphql::helpers::parse_id,
    models::dto::{
        request::{SaveDraftRequest, StartGameRequest, SubmitAnswerRequest},
        response::{AdminLoginResponse, GameView, SaveScoreResponse},
    },
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn start_game(&self, ctx: &Context<'_>, input: StartGameRequest) -> Result<GameView> {
        let state = ctx.data::<AppState>()?;
        state.game_service.start_game(input).await.extend()
    }

    async fn submit_answer(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: SubmitAnswerRequest,
    ) -> Result<GameView> {
        let state = ctx.data::<AppState>()?;
        input.validate().map_err(AppError::from).extend()?;
        let id = parse_id(&id).extend()?;
        state.game_service.submit_answer(&id, &input.answer).await.extend()
    }

    async fn save_draft(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: SaveDraftRequest,
    ) -> Result<GameView> {
        let state = ctx.data::<AppState>()?;
        input.validate().map_err(AppError::from).extend()?;
        let id = parse_id(&id).extend()?;
        state.game_service.save_draft(&id, &input.text).await.extend()
    }

    async fn continue_game(&self, ctx: &Context<'_>, id: ID) -> Result<GameView> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).extend()?;
        state.game_service.continue_game(&id).await.extend()
    }

    async fn resume_game(&self, ctx: &Context<'_>, id: ID) -> Result<GameView> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).extend()?;
        state.game_service.resume_game(&id).await.extend()
    }

    async fn save_game(&self, ctx: &Context<'_>, id: ID) -> Result<SaveScoreResponse> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).extend()?;
        state.game_service.save_game(&id).await.extend()
    }

    async fn abandon_game(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let state = ctx.data::<AppState>()?;
        let id = parse_id(&id).extend()?;
        state.game_service.abandon_game(&id).await.extend()?;
        Ok(true)
    }

    async fn admin_login(&self, ctx: &Context<'_>, password: String) -> Result<AdminLoginResponse> {
        let state = ctx.data::<AppState>()?;
        let token = state.jwt_service.login_admin(&password).extend()?;

        Ok(AdminLoginResponse {
            token,
            expires_in_hours: state.jwt_service.expiration_hours(),
        })
    }
}
