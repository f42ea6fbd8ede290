use actix_cors::Cors;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use deadpool_postgres::{Manager, Pool};
use dotenv::dotenv;
use log::{debug, error, info};
use std::str::FromStr;
use tokio_postgres::{Config, NoTls};
use utoipa::OpenApi;
use utoipa_actix_web::AppExt;
use utoipa_swagger_ui::SwaggerUi;

use valsim_backend::db;
use valsim_backend::engine::{MatchSimulator, SimError};
use valsim_backend::generator::PlayerGenerator;
use valsim_backend::maps::MapCatalog;
use valsim_backend::models::{
    ErrorBody, GeneratePlayerRequest, GenerateRosterRequest, SimulateMatchRequest,
    SimulateMatchResponse,
};
use valsim_backend::weapons::WeaponCatalog;

#[get("/")]
async fn index() -> impl Responder {
    debug!("GET / called");
    HttpResponse::Ok().body("valsim backend is running!")
}

#[utoipa::path(
    post,
    path = "/matches/simulate",
    request_body = SimulateMatchRequest,
    responses(
        (status = 200, description = "Match simulated and persisted", body = SimulateMatchResponse),
        (status = 400, description = "Invalid request or players", body = ErrorBody),
        (status = 404, description = "Team not found", body = ErrorBody),
        (status = 500, description = "Engine or persistence failure", body = ErrorBody),
    )
)]
#[post("/matches/simulate")]
async fn simulate_match(
    pool: web::Data<Pool>,
    weapons: web::Data<WeaponCatalog>,
    maps: web::Data<MapCatalog>,
    req: web::Json<SimulateMatchRequest>,
) -> impl Responder {
    debug!("POST /matches/simulate: {} vs {}", req.team_a, req.team_b);

    let config = match req.to_config() {
        Ok(config) => config,
        Err(e) => return HttpResponse::BadRequest().json(ErrorBody::from_validation(&e)),
    };

    let (team_a_row, team_a_players) = match load_team(&pool, &req.team_a).await {
        Ok(team) => team,
        Err(resp) => return resp,
    };
    let (team_b_row, team_b_players) = match load_team(&pool, &req.team_b).await {
        Ok(team) => team,
        Err(resp) => return resp,
    };

    let simulator = MatchSimulator::new(weapons.get_ref(), maps.get_ref());
    let result = match simulator.simulate_match(&team_a_players, &team_b_players, &config) {
        Ok(result) => result,
        Err(SimError::Validation(e)) => {
            return HttpResponse::BadRequest().json(ErrorBody::from_validation(&e))
        }
        Err(SimError::Invariant(e)) => {
            error!("engine invariant violation: {}", e);
            return HttpResponse::InternalServerError().json(ErrorBody::new(e.to_string()));
        }
    };

    let match_id =
        match db::insert_match_record(&pool, &team_a_row.name, &team_b_row.name, &result).await {
            Ok(id) => id,
            Err(e) => {
                error!("match persistence failed: {}", e);
                return HttpResponse::InternalServerError().json(ErrorBody::new(e));
            }
        };
    if let Err(e) = db::insert_economy_logs(&pool, &match_id, &result.economy_logs).await {
        error!("economy log persistence failed: {}", e);
        return HttpResponse::InternalServerError().json(ErrorBody::new(e));
    }

    info!(
        "match {} complete: {} {} - {} {}",
        match_id, team_a_row.name, result.score.team_a, result.score.team_b, team_b_row.name
    );
    HttpResponse::Ok().json(SimulateMatchResponse { match_id, result })
}

async fn load_team(
    pool: &Pool,
    ident: &str,
) -> Result<(db::TeamRow, Vec<valsim_backend::player::Player>), HttpResponse> {
    let team = match db::get_team(pool, ident).await {
        Ok(Some(team)) => team,
        Ok(None) => {
            return Err(HttpResponse::NotFound()
                .json(ErrorBody::new(format!("Team '{}' not found", ident))))
        }
        Err(e) => {
            error!("team lookup failed: {}", e);
            return Err(HttpResponse::InternalServerError().json(ErrorBody::new(e)));
        }
    };
    match db::get_team_players(pool, &team.id).await {
        Ok(players) => Ok((team, players)),
        Err(e) => {
            error!("roster load failed: {}", e);
            Err(HttpResponse::InternalServerError().json(ErrorBody::new(e)))
        }
    }
}

#[utoipa::path(
    post,
    path = "/players/generate",
    request_body = GeneratePlayerRequest,
    responses(
        (status = 200, description = "Player generated", body = valsim_backend::player::Player),
        (status = 400, description = "Invalid generation options", body = ErrorBody),
    )
)]
#[post("/players/generate")]
async fn generate_player(req: web::Json<GeneratePlayerRequest>) -> impl Responder {
    let options = match req.to_options() {
        Ok(options) => options,
        Err(e) => return HttpResponse::BadRequest().json(ErrorBody::from_validation(&e)),
    };
    let mut generator = PlayerGenerator::new();
    match generator.generate_player(&options) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => HttpResponse::BadRequest().json(ErrorBody::from_validation(&e)),
    }
}

#[utoipa::path(
    post,
    path = "/teams/generate",
    request_body = GenerateRosterRequest,
    responses(
        (status = 200, description = "Roster generated", body = Vec<valsim_backend::player::Player>),
        (status = 400, description = "Invalid generation options", body = ErrorBody),
    )
)]
#[post("/teams/generate")]
async fn generate_roster(req: web::Json<GenerateRosterRequest>) -> impl Responder {
    let options = match req.player.to_options() {
        Ok(options) => options,
        Err(e) => return HttpResponse::BadRequest().json(ErrorBody::from_validation(&e)),
    };
    let mut generator = PlayerGenerator::new();
    match generator.generate_roster(&options, req.roster_size.unwrap_or(5)) {
        Ok(roster) => HttpResponse::Ok().json(roster),
        Err(e) => HttpResponse::BadRequest().json(ErrorBody::from_validation(&e)),
    }
}

#[utoipa::path(
    get,
    path = "/maps",
    responses(
        (status = 200, description = "Available map layouts", body = Vec<valsim_backend::maps::MapLayout>),
    )
)]
#[get("/maps")]
async fn get_maps(maps: web::Data<MapCatalog>) -> impl Responder {
    let layouts: Vec<_> = maps.layouts().cloned().collect();
    HttpResponse::Ok().json(layouts)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    #[derive(OpenApi)]
    #[openapi(
        paths(simulate_match, generate_player, generate_roster, get_maps),
        components(
            schemas(
                SimulateMatchRequest,
                GeneratePlayerRequest,
                GenerateRosterRequest,
                ErrorBody,
                valsim_backend::player::Player,
                valsim_backend::maps::MapLayout,
            )
        ),
        info(
            title = "valsim Backend API",
            version = "1.0.0",
            description = "Tactical shooter match simulation service with Actix-Web and Swagger UI"
        )
    )]
    struct ApiDoc;

    dotenv().ok();
    env_logger::init();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let config = Config::from_str(&db_url).expect("Invalid DATABASE_URL");
    let mgr = Manager::new(config, NoTls);
    let pool = Pool::builder(mgr).max_size(16).build().unwrap();

    let weapons = web::Data::new(WeaponCatalog::new());
    let maps = web::Data::new(MapCatalog::with_standard_maps());

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    info!("Starting server at http://{}", bind_addr);
    HttpServer::new(move || {
        let cors = Cors::permissive();
        App::new()
            .wrap(cors)
            .service(index)
            .service(simulate_match)
            .service(generate_player)
            .service(generate_roster)
            .service(get_maps)
            .into_utoipa_app()
            .openapi(ApiDoc::openapi())
            .openapi_service(|api| {
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", api)
            })
            .app_data(web::Data::new(pool.clone()))
            .app_data(weapons.clone())
            .app_data(maps.clone())
            .into_app()
    })
    .bind(bind_addr)?
    .run()
    .await
}
