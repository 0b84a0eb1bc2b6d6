pub mod roll_list;

pub use roll_list::load_roll_numbers;
