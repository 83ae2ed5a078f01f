use actix_web::http::StatusCode;
use actix_web::{delete, error, get, post, put, web, Error, HttpResponse};

use crate::catalog::Catalog;
use crate::error::detail_response;
use crate::models::{NewChef, NewRestaurant, NewReview, PizzaPayload};

type CatalogData = web::Data<dyn Catalog>;

/// Registers every catalog route plus the extractor error handlers.
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    // body and path decoding failures are 422 so they never read as a bad reference (400)
    let json = web::JsonConfig::default().error_handler(|err, _req| {
        let response = detail_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string());
        error::InternalError::from_response(err, response).into()
    });
    let path = web::PathConfig::default().error_handler(|err, _req| {
        let response = detail_response(StatusCode::UNPROCESSABLE_ENTITY, err.to_string());
        error::InternalError::from_response(err, response).into()
    });

    cfg.app_data(json)
        .app_data(path)
        .service(get_restaurants)
        .service(add_restaurant)
        .service(get_restaurant_menu)
        .service(get_pizzas)
        .service(get_pizza)
        .service(add_pizza)
        .service(update_pizza)
        .service(delete_pizza)
        .service(get_ingredients)
        .service(get_chefs)
        .service(add_chef)
        .service(get_reviews)
        .service(add_review);
}

#[get("/restaurants")]
async fn get_restaurants(catalog: CatalogData) -> Result<HttpResponse, Error> {
    let restaurants = web::block(move || catalog.restaurants()).await??;
    Ok(HttpResponse::Ok().json(restaurants))
}

#[post("/restaurants")]
async fn add_restaurant(
    catalog: CatalogData,
    body: web::Json<NewRestaurant>,
) -> Result<HttpResponse, Error> {
    let restaurant = web::block(move || catalog.add_restaurant(body.into_inner())).await??;
    log::info!("created restaurant {}", restaurant.id);
    Ok(HttpResponse::Ok().json(restaurant))
}

#[get("/restaurants/{restaurant_id}/menu")]
async fn get_restaurant_menu(
    restaurant_id: web::Path<i32>,
    catalog: CatalogData,
) -> Result<HttpResponse, Error> {
    let menu = web::block(move || catalog.menu(restaurant_id.into_inner())).await??;
    Ok(HttpResponse::Ok().json(menu))
}

#[get("/pizzas")]
async fn get_pizzas(catalog: CatalogData) -> Result<HttpResponse, Error> {
    let pizzas = web::block(move || catalog.pizzas()).await??;
    Ok(HttpResponse::Ok().json(pizzas))
}

#[get("/pizzas/{pizza_id}")]
async fn get_pizza(pizza_id: web::Path<i32>, catalog: CatalogData) -> Result<HttpResponse, Error> {
    let pizza = web::block(move || catalog.pizza(pizza_id.into_inner())).await??;
    Ok(HttpResponse::Ok().json(pizza))
}

#[post("/pizzas")]
async fn add_pizza(
    catalog: CatalogData,
    body: web::Json<PizzaPayload>,
) -> Result<HttpResponse, Error> {
    let pizza = web::block(move || catalog.add_pizza(body.into_inner())).await??;
    log::info!(
        "created pizza {} for restaurant {}",
        pizza.id,
        pizza.restaurant_id
    );
    Ok(HttpResponse::Ok().json(pizza))
}

#[put("/pizzas/{pizza_id}")]
async fn update_pizza(
    pizza_id: web::Path<i32>,
    catalog: CatalogData,
    body: web::Json<PizzaPayload>,
) -> Result<HttpResponse, Error> {
    let pizza_id = pizza_id.into_inner();
    let pizza = web::block(move || catalog.update_pizza(pizza_id, body.into_inner())).await??;
    log::info!("updated pizza {}", pizza_id);
    Ok(HttpResponse::Ok().json(pizza))
}

#[delete("/pizzas/{pizza_id}")]
async fn delete_pizza(
    pizza_id: web::Path<i32>,
    catalog: CatalogData,
) -> Result<HttpResponse, Error> {
    let pizza_id = pizza_id.into_inner();
    web::block(move || catalog.delete_pizza(pizza_id)).await??;
    log::info!("deleted pizza {}", pizza_id);
    Ok(HttpResponse::NoContent().finish())
}

#[get("/ingredients")]
async fn get_ingredients(catalog: CatalogData) -> Result<HttpResponse, Error> {
    let ingredients = web::block(move || catalog.ingredients()).await??;
    Ok(HttpResponse::Ok().json(ingredients))
}

#[get("/chefs")]
async fn get_chefs(catalog: CatalogData) -> Result<HttpResponse, Error> {
    let chefs = web::block(move || catalog.chefs()).await??;
    Ok(HttpResponse::Ok().json(chefs))
}

#[post("/chefs")]
async fn add_chef(catalog: CatalogData, body: web::Json<NewChef>) -> Result<HttpResponse, Error> {
    let chef = web::block(move || catalog.add_chef(body.into_inner())).await??;
    log::info!("created chef {} at restaurant {}", chef.id, chef.restaurant_id);
    Ok(HttpResponse::Ok().json(chef))
}

#[get("/reviews")]
async fn get_reviews(catalog: CatalogData) -> Result<HttpResponse, Error> {
    let reviews = web::block(move || catalog.reviews()).await??;
    Ok(HttpResponse::Ok().json(reviews))
}

#[post("/reviews")]
async fn add_review(
    catalog: CatalogData,
    body: web::Json<NewReview>,
) -> Result<HttpResponse, Error> {
    let review = web::block(move || catalog.add_review(body.into_inner())).await??;
    log::info!(
        "created review {} for restaurant {}",
        review.id,
        review.restaurant_id
    );
    Ok(HttpResponse::Ok().json(review))
}
