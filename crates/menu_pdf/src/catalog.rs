//! The built-in East @ West menu.

use crate::model::{Menu, MenuItem, Restaurant, Section};

fn item(name: &str, description: &str, price: &str) -> MenuItem {
    MenuItem::new(name, description, price)
}

/// Returns the full East @ West menu in reading order.
pub fn east_at_west() -> Menu {
    Menu::new(Restaurant::default())
        .with_section(cold_mezzes())
        .with_section(warm_mezzes())
        .with_info("All tasting menus serve 2 people")
        .with_section(tasting_menus())
        .with_section(dishes())
        .with_info("All skewers served with garlic sauce and pickles")
        .with_section(skewers())
        .with_info("All dishes are served with Lebanese bread")
        .with_section(lunch_dishes())
        .with_section(sandwiches())
        .with_section(salads())
}

fn cold_mezzes() -> Section {
    Section::new("Cold Mezzes").with_items([
        item("Zahra", "Cooked cauliflower, marinated in a homemade sauce (tomato, garlic and lemon), topped with lemon tahini sauce", "7,50€").vegetarian(),
        item("Muhammara", "Grilled red pepper dip, pomegranate molasses and walnuts", "8€").vegan(),
        item("Makdous", "Baby eggplants stuffed with walnuts and peppers marinated in olive oil", "8€").vegan(),
        item("Itch", "Bulgur cooked in tomato sauce with peppers, onion, parsley and pomegranate molasses", "7,50€").vegan(),
        item("Hummus", "Chickpea puree with tahini (sesame paste)", "7,50€").vegan(),
        item("Moutabal", "Grilled eggplant caviar with tahini (sesame paste)", "8€").vegan(),
        item("Warak Enab", "Vine leaves stuffed with rice, herbs, marinated in olive oil, mint and pomegranate molasses", "7€").vegan(),
        item("Moussaka", "Eggplant, onion, chickpeas and tomato", "7,50€").vegan(),
    ])
}

fn warm_mezzes() -> Section {
    Section::new("Warm Mezzes").with_items([
        item("Oriental Eggplant", "Grilled eggplant topped with minced meat cooked with onion, tomato and pepper", "13,50€"),
        item("Chicken Liver", "Chicken liver cooked with onion and special spices. Served with pomegranate sauce", "11,50€"),
        item("Fatteh", "Cooked chickpeas, fried Lebanese bread, garlic and homemade lemon tahini sauce", "7,50€").vegetarian(),
        item("Falafel (2 pcs)", "Fried chickpea balls served with tahini sauce", "4€").vegan(),
        item("Grilled Syrian Cheese", "Grilled Syrian cheese", "10€").vegetarian(),
        item("Kibbeh (2 pcs)", "Fried bulgur croquettes stuffed with minced meat, onion and walnuts", "7€"),
        item("Sujuk", "Oven-baked Lebanese bread stuffed with seasoned minced meat, tomato and pickles", "12,50€"),
        item("Arayes Cheese", "Oven-baked Lebanese bread stuffed with Syrian cheese", "10€").vegetarian(),
        item("Toshka", "Oven-baked Lebanese bread stuffed with minced meat and Syrian cheese", "12,50€"),
        item("Batata Harra", "Fried potato cubes with red peppers, coriander and garlic", "7,50€").vegan(),
        item("Foul Moudamas", "Fava beans marinated with lemon juice, tomatoes, cumin, garlic, olive oil and tahini sauce", "8€").vegan(),
    ])
}

fn tasting_menus() -> Section {
    Section::new("Tasting Menus / 2 People").with_items([
        item("Menu East@West", "Fattoush, Hummus, Moutabal, Zahra, Falafel, 2× Kibbeh, 2× Kabab skewers, 2× Chich taouk, 2× Dessert", "67,50€"),
        item("Menu Vegan", "Fattoush, Hummus, Moutabal, Moussaka, Itch, Zahra, 2× Falafel, Batata Harra, 2× Dessert", "64,50€").vegan(),
        item("Menu Sahten", "Tabouleh, Hummus, Toshka, Sujuk, Chicken liver, 2× Kibbeh, 2× Skewers, 2× Dessert", "84€"),
        item("Menu Lazeez", "Tabouleh, Hummus, Moutabal, Muhammara, Warak Enab, Moussaka, Foul Moudamas, 2× Falafel, 2× Dessert", "65,50€").vegan(),
    ])
}

fn dishes() -> Section {
    Section::new("Dishes").with_items([
        item("Foodie Meat", "Hummus, Zahra, Kibbeh, 1× Chich taouk, 1× Kabab, Foul moudamas, Fattouch", "24€"),
        item("Foodie Vegan", "Hummus, Zahra, 2× Warak eneb, 2× Falafel, Batata harra, Foul moudamas, Fattouch", "24€").vegan(),
        item("Chef's Mezze", "Grilled minced meat with mushrooms, onion, lemon tahini sauce and parsley", "13,50€"),
    ])
}

fn skewers() -> Section {
    Section::new("Skewers").with_items([
        item("2× Shish Taouk", "Chicken skewers", "10€"),
        item("2× Kebab", "Beef skewers", "10€"),
    ])
}

fn lunch_dishes() -> Section {
    Section::new("Lunch Dishes").with_items([
        item("Chef's Dish", "1 kebab, 1 chich taouk, warak eneb, kibbeh, cauliflower, muhammara, fattouch", "23,50€"),
        item("Sujuk", "Lebanese bread stuffed with minced meat, tomato, pickles + hummus, moutabal, Fattoush", "20,80€"),
        item("Toshka", "Lebanese bread stuffed with minced meat and Syrian cheese + hummus, moutabal, Fattoush", "20,80€"),
        item("Chich Taouk", "2 chicken skewers + hummus, itch (bulgur), fattoush, pickles, garlic sauce", "19€"),
        item("Mix Grill", "1 kebab and 1 chich taouk + hummus, itch (bulgur), fattoush", "19€"),
        item("Kebab", "2 seasoned minced meat skewers + hummus, fattoush", "19€"),
        item("Mix Break", "Hummus, itch (bulgur), kabab/chich taouk, cauliflower, fattouch", "16,50€"),
        item("Falafel", "4 pieces falafel + hummus, moutabal, Fattoush, tahini sauce, pickles", "18€").vegan(),
        item("Mix Break Vegan", "Hummus, warak eneb, itch (bulgur), cauliflower, fattouch", "14,50€").vegan(),
    ])
}

fn sandwiches() -> Section {
    Section::new("Sandwich + Salad Formulas").with_items([
        item("Falafel Sandwich + Fattoush Salad", "Falafel, tomato, tahini, pickles, lettuce", "12,50€").vegan(),
        item("Chich Taouk + Fattoush Salad", "Grilled chicken, lettuce, tomato, garlic sauce", "12,50€"),
        item("Kabab + Fattoush Salad", "Minced meat, hummus, tomato, lettuce, onion", "12,50€"),
    ])
}

fn salads() -> Section {
    Section::new("Salads").with_items([
        item("Original Tabouleh", "Parsley, tomato, onion, lemon, bulgur, mint", "8€").vegan(),
        item("Fattoush", "Tomato, lettuce, red cabbage, radish, cucumber, onion", "8€").vegan(),
        item("Falafel Salad", "Falafel, lettuce, cucumber, tomato, pickles, tahini", "13,50€").vegan(),
    ])
}
