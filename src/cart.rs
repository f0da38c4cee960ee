use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-owned cart: an ordered list of book ids where a duplicate id means
/// another unit of the same book. The server never stores one of these; the
/// client keeps it under a local-storage key between reloads and hands the
/// plain id list to the checkout endpoint.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart{
    items: Vec<Uuid>
}

// One display row of the cart: a unique book id with its unit count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine{
    pub book_id: Uuid,
    pub quantity: usize
}

impl Cart {
    pub fn new() -> Self{
        Cart{ items: Vec::new() }
    }

    // Appends one occurrence, preserving insertion order
    pub fn add_item(&mut self, book_id: Uuid){
        self.items.push(book_id);
    }

    // Drops every occurrence of the id, not just one
    pub fn remove_item(&mut self, book_id: Uuid){
        self.items.retain(|item| *item != book_id);
    }

    pub fn clear(&mut self){
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool{
        self.items.is_empty()
    }

    pub fn len(&self) -> usize{
        self.items.len()
    }

    pub fn items(&self) -> &[Uuid]{
        &self.items
    }

    pub fn into_items(self) -> Vec<Uuid>{
        self.items
    }

    // Folds duplicates into (id, quantity) rows, keeping first-appearance
    // order for display
    pub fn lines(&self) -> Vec<CartLine>{
        let mut lines: Vec<CartLine> = Vec::new();

        for item in self.items.iter(){
            match lines.iter_mut().find(|line| line.book_id == *item){
                Some(line) => line.quantity += 1,
                None => lines.push(CartLine{ book_id: *item, quantity: 1 })
            }
        }

        lines
    }
}
