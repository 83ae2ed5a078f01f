use crate::db::{DbConn, DbPool};
use crate::error::CatalogError;
use crate::models::{
    Chef, Ingredient, NewChef, NewRestaurant, NewReview, Pizza, PizzaPayload, Restaurant, Review,
    ReviewOut,
};
use crate::query;

pub(crate) trait Catalog: Send + Sync {
    fn restaurants(&self) -> Result<Vec<Restaurant>, CatalogError>;
    fn add_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, CatalogError>;
    /// Fails with `ResourceNotFound` if the restaurant does not exist.
    fn menu(&self, restaurant_id: i32) -> Result<Vec<Pizza>, CatalogError>;

    fn pizzas(&self) -> Result<Vec<Pizza>, CatalogError>;
    fn pizza(&self, pizza_id: i32) -> Result<Pizza, CatalogError>;
    fn add_pizza(&self, payload: PizzaPayload) -> Result<Pizza, CatalogError>;
    fn update_pizza(&self, pizza_id: i32, payload: PizzaPayload) -> Result<Pizza, CatalogError>;
    fn delete_pizza(&self, pizza_id: i32) -> Result<(), CatalogError>;

    fn ingredients(&self) -> Result<Vec<Ingredient>, CatalogError>;

    fn chefs(&self) -> Result<Vec<Chef>, CatalogError>;
    fn add_chef(&self, new: NewChef) -> Result<Chef, CatalogError>;

    fn reviews(&self) -> Result<Vec<ReviewOut>, CatalogError>;
    fn add_review(&self, new: NewReview) -> Result<Review, CatalogError>;
}

// one pooled connection per call, returned to the pool on drop
pub(crate) struct PgCatalog {
    pool: DbPool,
}

impl PgCatalog {
    pub(crate) fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConn, CatalogError> {
        Ok(self.pool.get()?)
    }
}

impl Catalog for PgCatalog {
    fn restaurants(&self) -> Result<Vec<Restaurant>, CatalogError> {
        let conn = self.conn()?;
        Ok(query::find_all_restaurants(&conn)?)
    }

    fn add_restaurant(&self, new: NewRestaurant) -> Result<Restaurant, CatalogError> {
        let conn = self.conn()?;
        Ok(query::insert_restaurant(&new, &conn)?)
    }

    fn menu(&self, restaurant_id: i32) -> Result<Vec<Pizza>, CatalogError> {
        let conn = self.conn()?;
        query::find_restaurant_menu(restaurant_id, &conn)
    }

    fn pizzas(&self) -> Result<Vec<Pizza>, CatalogError> {
        let conn = self.conn()?;
        Ok(query::find_all_pizzas(&conn)?)
    }

    fn pizza(&self, pizza_id: i32) -> Result<Pizza, CatalogError> {
        let conn = self.conn()?;
        query::find_pizza(pizza_id, &conn)
    }

    fn add_pizza(&self, payload: PizzaPayload) -> Result<Pizza, CatalogError> {
        let conn = self.conn()?;
        query::insert_pizza(&payload, &conn)
    }

    fn update_pizza(&self, pizza_id: i32, payload: PizzaPayload) -> Result<Pizza, CatalogError> {
        let conn = self.conn()?;
        query::update_pizza(pizza_id, &payload, &conn)
    }

    fn delete_pizza(&self, pizza_id: i32) -> Result<(), CatalogError> {
        let conn = self.conn()?;
        query::delete_pizza(pizza_id, &conn)
    }

    fn ingredients(&self) -> Result<Vec<Ingredient>, CatalogError> {
        let conn = self.conn()?;
        Ok(query::find_all_ingredients(&conn)?)
    }

    fn chefs(&self) -> Result<Vec<Chef>, CatalogError> {
        let conn = self.conn()?;
        Ok(query::find_all_chefs(&conn)?)
    }

    fn add_chef(&self, new: NewChef) -> Result<Chef, CatalogError> {
        let conn = self.conn()?;
        query::insert_chef(&new, &conn)
    }

    fn reviews(&self) -> Result<Vec<ReviewOut>, CatalogError> {
        let conn = self.conn()?;
        Ok(query::find_all_reviews(&conn)?)
    }

    fn add_review(&self, new: NewReview) -> Result<Review, CatalogError> {
        let conn = self.conn()?;
        query::insert_review(&new, &conn)
    }
}
