pub mod published_items;
