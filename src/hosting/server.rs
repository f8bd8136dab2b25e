use super::*;
use crate::ID;
use crate::LedgerError;
use crate::club::Viewer;
use crate::desk::Desk;
use crate::desk::Outcome;
use crate::reconcile::CashoutForm;
use crate::store::Store;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::middleware::Logger;
use actix_web::web;

/// Typed confirmation carried by reset requests.
#[derive(Debug, serde::Deserialize)]
pub struct Confirm {
    pub confirmation: String,
}

pub struct Server;

impl Server {
    pub async fn run<S: Store + 'static>(store: S) -> Result<(), std::io::Error> {
        let desk = web::Data::new(Desk::from(store));
        let addr = std::env::var("BIND_ADDR")
            .map_err(|_| std::io::Error::other("BIND_ADDR must be set"))?;
        log::info!("starting ledger server on {}", addr);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(desk.clone())
                .route("/health", web::get().to(health))
                .route("/sessions/{id}/cashouts", web::get().to(board::<S>))
                .route("/sessions/{id}/cashouts", web::post().to(record::<S>))
                .route("/sessions/{id}/cashouts", web::delete().to(reset_all::<S>))
                .route("/sessions/{id}/cashouts/{player}", web::delete().to(reset::<S>))
                .route("/reports/{email}", web::get().to(report::<S>))
        })
        .workers(4)
        .bind(addr)?
        .run()
        .await
    }
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn board<S: Store + 'static>(
    desk: web::Data<Desk<S>>,
    path: web::Path<String>,
    req: HttpRequest,
) -> impl Responder {
    let ref id = ID::from(path.into_inner());
    match desk.board(id, &viewer_of(&req)).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => failure(e),
    }
}

async fn record<S: Store + 'static>(
    desk: web::Data<Desk<S>>,
    path: web::Path<String>,
    form: web::Json<CashoutForm>,
    req: HttpRequest,
) -> impl Responder {
    let ref id = ID::from(path.into_inner());
    match desk.record_cashout(id, &viewer_of(&req), &form).await {
        Ok(session) => HttpResponse::Created().json(session),
        Err(e) => failure(e),
    }
}

async fn reset<S: Store + 'static>(
    desk: web::Data<Desk<S>>,
    path: web::Path<(String, String)>,
    body: web::Json<Confirm>,
    req: HttpRequest,
) -> impl Responder {
    let (session, player) = path.into_inner();
    let ref id = ID::from(session);
    let ref player = ID::from(player);
    match desk
        .reset_cashout(id, &viewer_of(&req), player, &body.confirmation)
        .await
    {
        Ok(outcome) => applied(outcome),
        Err(e) => failure(e),
    }
}

async fn reset_all<S: Store + 'static>(
    desk: web::Data<Desk<S>>,
    path: web::Path<String>,
    body: web::Json<Confirm>,
    req: HttpRequest,
) -> impl Responder {
    let ref id = ID::from(path.into_inner());
    match desk.reset_all(id, &viewer_of(&req), &body.confirmation).await {
        Ok(outcome) => applied(outcome),
        Err(e) => failure(e),
    }
}

async fn report<S: Store + 'static>(
    desk: web::Data<Desk<S>>,
    path: web::Path<String>,
) -> impl Responder {
    match desk.report(&path.into_inner()).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(e) => failure(e),
    }
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

fn viewer_of(req: &HttpRequest) -> Viewer {
    viewer(header(req, SYSTEM_ROLE), header(req, CLUB_ROLE))
}

fn applied(outcome: Outcome) -> HttpResponse {
    match outcome {
        Outcome::Applied(session) => HttpResponse::Ok().json(session),
        Outcome::Unconfirmed => HttpResponse::PreconditionFailed()
            .json(serde_json::json!({ "error": "not confirmed" })),
    }
}

fn failure(e: LedgerError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.kind(), "message": e.to_string() });
    match e {
        LedgerError::InvalidState(_) => HttpResponse::Conflict().json(body),
        LedgerError::Validation(_) => HttpResponse::BadRequest().json(body),
        LedgerError::DataIntegrity(_) => HttpResponse::UnprocessableEntity().json(body),
        LedgerError::Storage(_) => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}
