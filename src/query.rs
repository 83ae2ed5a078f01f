use std::collections::{BTreeSet, HashMap};

use diesel::dsl::exists;
use diesel::prelude::*;

use crate::error::CatalogError;
use crate::models::{
    Chef, Ingredient, NewChef, NewRestaurant, NewReview, Pizza, PizzaIngredient, PizzaPayload,
    PizzaRow, Restaurant, Review, ReviewOut,
};
use crate::schema::{chefs, ingredients, pizza_ingredients, pizzas, restaurants, reviews};

// postgres caps a statement at 65535 bind parameters
const BIND_CHUNK: usize = 1000;

pub(crate) fn find_all_restaurants(conn: &PgConnection) -> QueryResult<Vec<Restaurant>> {
    restaurants::table.order(restaurants::id).load(conn)
}

pub(crate) fn insert_restaurant(
    new: &NewRestaurant,
    conn: &PgConnection,
) -> QueryResult<Restaurant> {
    diesel::insert_into(restaurants::table)
        .values(new)
        .get_result(conn)
}

pub(crate) fn restaurant_exists(restaurant_id: i32, conn: &PgConnection) -> QueryResult<bool> {
    diesel::select(exists(restaurants::table.find(restaurant_id))).get_result(conn)
}

fn ensure_restaurant(restaurant_id: i32, conn: &PgConnection) -> Result<(), CatalogError> {
    if restaurant_exists(restaurant_id, conn)? {
        Ok(())
    } else {
        Err(CatalogError::unknown_restaurant(restaurant_id))
    }
}

pub(crate) fn find_restaurant_menu(
    restaurant_id: i32,
    conn: &PgConnection,
) -> Result<Vec<Pizza>, CatalogError> {
    if !restaurant_exists(restaurant_id, conn)? {
        return Err(CatalogError::not_found("restaurant", restaurant_id));
    }
    let rows = pizzas::table
        .filter(pizzas::restaurant_id.eq(restaurant_id))
        .order(pizzas::id)
        .load::<PizzaRow>(conn)?;
    let on_menu = pizzas::table
        .filter(pizzas::restaurant_id.eq(restaurant_id))
        .select(pizzas::id);
    let pairs = pizza_ingredients::table
        .inner_join(ingredients::table)
        .filter(pizza_ingredients::pizza_id.eq_any(on_menu))
        .order((pizza_ingredients::pizza_id, ingredients::name))
        .select((pizza_ingredients::pizza_id, ingredients::name))
        .load::<(i32, String)>(conn)?;
    Ok(attach_ingredients(rows, pairs))
}

pub(crate) fn find_all_pizzas(conn: &PgConnection) -> QueryResult<Vec<Pizza>> {
    let rows = pizzas::table.order(pizzas::id).load::<PizzaRow>(conn)?;
    let pairs = pizza_ingredients::table
        .inner_join(ingredients::table)
        .order((pizza_ingredients::pizza_id, ingredients::name))
        .select((pizza_ingredients::pizza_id, ingredients::name))
        .load::<(i32, String)>(conn)?;
    Ok(attach_ingredients(rows, pairs))
}

pub(crate) fn find_pizza(pizza_id: i32, conn: &PgConnection) -> Result<Pizza, CatalogError> {
    let row = pizzas::table
        .find(pizza_id)
        .first::<PizzaRow>(conn)
        .optional()?
        .ok_or_else(|| CatalogError::not_found("pizza", pizza_id))?;
    let names = find_pizza_ingredient_names(row.id, conn)?;
    Ok(row.with_ingredients(names))
}

pub(crate) fn insert_pizza(
    payload: &PizzaPayload,
    conn: &PgConnection,
) -> Result<Pizza, CatalogError> {
    conn.transaction::<_, CatalogError, _>(|| {
        ensure_restaurant(payload.restaurant_id, conn)?;
        let row: PizzaRow = diesel::insert_into(pizzas::table)
            .values(&payload.columns())
            .get_result(conn)?;
        link_ingredients(row.id, &payload.ingredients, conn)?;
        let names = find_pizza_ingredient_names(row.id, conn)?;
        Ok(row.with_ingredients(names))
    })
}

/// Overwrites every column of the pizza and replaces its ingredient set.
pub(crate) fn update_pizza(
    pizza_id: i32,
    payload: &PizzaPayload,
    conn: &PgConnection,
) -> Result<Pizza, CatalogError> {
    conn.transaction::<_, CatalogError, _>(|| {
        ensure_restaurant(payload.restaurant_id, conn)?;
        let row: PizzaRow = diesel::update(pizzas::table.find(pizza_id))
            .set(&payload.columns())
            .get_result(conn)
            .optional()?
            .ok_or_else(|| CatalogError::not_found("pizza", pizza_id))?;
        unlink_ingredients(pizza_id, conn)?;
        link_ingredients(pizza_id, &payload.ingredients, conn)?;
        let names = find_pizza_ingredient_names(pizza_id, conn)?;
        Ok(row.with_ingredients(names))
    })
}

pub(crate) fn delete_pizza(pizza_id: i32, conn: &PgConnection) -> Result<(), CatalogError> {
    conn.transaction::<_, CatalogError, _>(|| {
        unlink_ingredients(pizza_id, conn)?;
        let removed = diesel::delete(pizzas::table.find(pizza_id)).execute(conn)?;
        if removed == 0 {
            return Err(CatalogError::not_found("pizza", pizza_id));
        }
        Ok(())
    })
}

pub(crate) fn find_pizza_ingredient_names(
    pizza_id: i32,
    conn: &PgConnection,
) -> QueryResult<Vec<String>> {
    pizza_ingredients::table
        .inner_join(ingredients::table)
        .filter(pizza_ingredients::pizza_id.eq(pizza_id))
        .order(ingredients::name)
        .select(ingredients::name)
        .load(conn)
}

// pairs are (pizza_id, ingredient name); pizzas without a pair get an empty list
fn attach_ingredients(rows: Vec<PizzaRow>, pairs: Vec<(i32, String)>) -> Vec<Pizza> {
    let mut by_pizza: HashMap<i32, Vec<String>> = HashMap::new();
    for (pizza_id, name) in pairs {
        by_pizza.entry(pizza_id).or_default().push(name);
    }
    rows.into_iter()
        .map(|row| {
            let names = by_pizza.remove(&row.id).unwrap_or_default();
            row.with_ingredients(names)
        })
        .collect()
}

/// Links the named ingredients to a pizza. Names with no ingredient row are skipped.
fn link_ingredients(pizza_id: i32, names: &[String], conn: &PgConnection) -> QueryResult<usize> {
    let names: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let mut linked = 0;
    for chunk in names.chunks(BIND_CHUNK) {
        let links: Vec<PizzaIngredient> = ingredients::table
            .filter(ingredients::name.eq_any(chunk.to_vec()))
            .select(ingredients::id)
            .load::<i32>(conn)?
            .into_iter()
            .map(|ingredient_id| PizzaIngredient {
                pizza_id,
                ingredient_id,
            })
            .collect();
        if links.is_empty() {
            continue;
        }
        linked += diesel::insert_into(pizza_ingredients::table)
            .values(&links)
            .execute(conn)?;
    }
    Ok(linked)
}

fn unlink_ingredients(pizza_id: i32, conn: &PgConnection) -> QueryResult<usize> {
    diesel::delete(pizza_ingredients::table.filter(pizza_ingredients::pizza_id.eq(pizza_id)))
        .execute(conn)
}

pub(crate) fn find_all_ingredients(conn: &PgConnection) -> QueryResult<Vec<Ingredient>> {
    ingredients::table.order(ingredients::id).load(conn)
}

pub(crate) fn find_all_chefs(conn: &PgConnection) -> QueryResult<Vec<Chef>> {
    chefs::table.order(chefs::id).load(conn)
}

pub(crate) fn insert_chef(new: &NewChef, conn: &PgConnection) -> Result<Chef, CatalogError> {
    conn.transaction::<_, CatalogError, _>(|| {
        ensure_restaurant(new.restaurant_id, conn)?;
        Ok(diesel::insert_into(chefs::table)
            .values(new)
            .get_result(conn)?)
    })
}

pub(crate) fn find_all_reviews(conn: &PgConnection) -> QueryResult<Vec<ReviewOut>> {
    reviews::table
        .inner_join(restaurants::table)
        .order(reviews::id)
        .select((reviews::id, restaurants::name, reviews::rating, reviews::text))
        .load(conn)
}

pub(crate) fn insert_review(new: &NewReview, conn: &PgConnection) -> Result<Review, CatalogError> {
    conn.transaction::<_, CatalogError, _>(|| {
        ensure_restaurant(new.restaurant_id, conn)?;
        Ok(diesel::insert_into(reviews::table)
            .values(new)
            .get_result(conn)?)
    })
}
