//! Stored image blobs referenced by recipes.

use crate::models::NewPhoto;
use crate::schema::photos;
use diesel::prelude::*;
use larder_core::DecodedImage;
use uuid::Uuid;

pub fn store_photo(conn: &mut PgConnection, user_id: Uuid, image: &DecodedImage) -> QueryResult<Uuid> {
    diesel::insert_into(photos::table)
        .values(NewPhoto {
            user_id,
            content_type: &image.content_type,
            data: &image.data,
        })
        .returning(photos::id)
        .get_result(conn)
}

pub fn delete_photo(conn: &mut PgConnection, id: Uuid) -> QueryResult<usize> {
    diesel::delete(photos::table.find(id)).execute(conn)
}

/// Public URL under which a stored photo is served.
pub fn photo_url(id: Uuid) -> String {
    format!("/api/photos/{}", id)
}
