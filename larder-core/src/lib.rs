pub mod error;
pub mod filters;
pub mod image;
pub mod pagination;
pub mod shopping_list;
pub mod validate;

pub use error::{ImageError, ValidationError};
pub use filters::{parse_flag, RecipeFilters};
pub use image::{decode_data_uri, validate_image, DecodedImage, ALLOWED_FORMATS, MAX_FILE_SIZE};
pub use pagination::{page_link, PageRequest};
pub use shopping_list::{render_shopping_list, ShoppingListLine};
pub use validate::{
    validate_email, validate_name, validate_password, validate_recipe, validate_username,
    IngredientAmount, RecipeInput, MAX_SMALL_INT,
};
