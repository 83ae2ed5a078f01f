use serde::{Deserialize, Serialize};

use crate::schema::{chefs, pizza_ingredients, pizzas, restaurants, reviews};

#[derive(Debug, Clone, PartialEq, Serialize, Queryable)]
pub(crate) struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

/// Request body for `POST /restaurants`. A client-supplied id is ignored.
#[derive(Debug, Clone, Deserialize, Insertable)]
#[table_name = "restaurants"]
pub(crate) struct NewRestaurant {
    pub name: String,
    pub address: String,
}

/// A `pizzas` row before its ingredient names are attached.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct PizzaRow {
    pub id: i32,
    pub name: String,
    pub cheese: String,
    pub dough: String,
    pub secret_ingredient: Option<String>,
    pub restaurant_id: i32,
}

impl PizzaRow {
    pub(crate) fn with_ingredients(self, ingredients: Vec<String>) -> Pizza {
        Pizza {
            id: self.id,
            name: self.name,
            cheese: self.cheese,
            dough: self.dough,
            secret_ingredient: self.secret_ingredient,
            restaurant_id: self.restaurant_id,
            ingredients,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Pizza {
    pub id: i32,
    pub name: String,
    pub cheese: String,
    pub dough: String,
    pub secret_ingredient: Option<String>,
    pub restaurant_id: i32,
    /// Names resolved through `pizza_ingredients`, sorted.
    pub ingredients: Vec<String>,
}

/// Request body shared by `POST /pizzas` and `PUT /pizzas/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PizzaPayload {
    pub name: String,
    pub cheese: String,
    pub dough: String,
    #[serde(default)]
    pub secret_ingredient: Option<String>,
    pub restaurant_id: i32,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl PizzaPayload {
    pub(crate) fn columns(&self) -> PizzaColumns<'_> {
        PizzaColumns {
            name: &self.name,
            cheese: &self.cheese,
            dough: &self.dough,
            secret_ingredient: self.secret_ingredient.as_deref(),
            restaurant_id: self.restaurant_id,
        }
    }
}

// used for both insert and full-row update, so a missing secret ingredient clears the column
#[derive(Debug, Insertable, AsChangeset)]
#[table_name = "pizzas"]
#[changeset_options(treat_none_as_null = "true")]
pub(crate) struct PizzaColumns<'a> {
    pub name: &'a str,
    pub cheese: &'a str,
    pub dough: &'a str,
    pub secret_ingredient: Option<&'a str>,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[table_name = "pizza_ingredients"]
pub(crate) struct PizzaIngredient {
    pub pizza_id: i32,      //foreign key
    pub ingredient_id: i32, //foreign key
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable)]
pub(crate) struct Ingredient {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable)]
pub(crate) struct Chef {
    pub id: i32,
    pub name: String,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, Deserialize, Insertable)]
#[table_name = "chefs"]
pub(crate) struct NewChef {
    pub name: String,
    pub restaurant_id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Queryable)]
pub(crate) struct Review {
    pub id: i32,
    pub restaurant_id: i32,
    pub rating: i32,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize, Insertable)]
#[table_name = "reviews"]
pub(crate) struct NewReview {
    pub restaurant_id: i32,
    pub rating: i32,
    pub text: String,
}

/// A review as listed, carrying the restaurant's name instead of its id.
#[derive(Debug, Clone, PartialEq, Serialize, Queryable)]
pub(crate) struct ReviewOut {
    pub id: i32,
    pub restaurant_name: String,
    pub rating: i32,
    pub text: String,
}
