mod common;
mod promo;
