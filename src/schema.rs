table! {
    restaurants (id) {
        id -> Int4,
        name -> Text,
        address -> Text,
    }
}

table! {
    pizzas (id) {
        id -> Int4,
        name -> Text,
        cheese -> Text,
        dough -> Text,
        secret_ingredient -> Nullable<Text>,
        restaurant_id -> Int4,
    }
}

table! {
    ingredients (id) {
        id -> Int4,
        name -> Text,
    }
}

table! {
    pizza_ingredients (pizza_id, ingredient_id) {
        pizza_id -> Int4,
        ingredient_id -> Int4,
    }
}

table! {
    chefs (id) {
        id -> Int4,
        name -> Text,
        restaurant_id -> Int4,
    }
}

table! {
    reviews (id) {
        id -> Int4,
        restaurant_id -> Int4,
        rating -> Int4,
        text -> Text,
    }
}

joinable!(pizza_ingredients -> ingredients (ingredient_id));
joinable!(reviews -> restaurants (restaurant_id));

allow_tables_to_appear_in_same_query!(
    restaurants,
    pizzas,
    ingredients,
    pizza_ingredients,
    chefs,
    reviews,
);
