use actix_web::{
    App, HttpResponse,
    error::ErrorUnauthorized,
    http::{StatusCode, header},
    test, web,
};

use innovation_portal::middleware::{RedirectUnauthorized, SIGNIN_PATH};

#[actix_web::test]
async fn redirects_unauthorized_to_signin() {
    let app = test::init_service(
        App::new().wrap(RedirectUnauthorized).route(
            "/applications",
            web::get().to(|| async { HttpResponse::Unauthorized().finish() }),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/applications").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), SIGNIN_PATH);
}

#[actix_web::test]
async fn extractor_errors_redirect_too() {
    // The identity extractor rejects with an error, not a response; the
    // middleware must catch that path as well.
    let app = test::init_service(
        App::new().wrap(RedirectUnauthorized).route(
            "/dashboard",
            web::get().to(|| async { Err::<HttpResponse, _>(ErrorUnauthorized("no identity")) }),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), SIGNIN_PATH);
}

#[actix_web::test]
async fn success_response_passes_through() {
    let app = test::init_service(
        App::new().wrap(RedirectUnauthorized).route(
            "/dashboard",
            web::get().to(|| async { HttpResponse::Ok().finish() }),
        ),
    )
    .await;

    let req = test::TestRequest::get().uri("/dashboard").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
