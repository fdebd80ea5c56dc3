mod codec;
mod error;
mod schema;
mod traits;
mod types;

pub use codec::{decode_item, encode_record, from_record, to_record};
pub use error::{Result, StorageError};
pub use schema::{
    table_schemas, IndexSchema, TableNames, TableSchema, CHAT_ID, CHAT_INDEX, EMAIL, EMAIL_INDEX,
    LIKED_USER_ID, MATCH_ID, MESSAGE_ID, USER_ID,
};
pub use traits::{
    LikeRepository, MatchRepository, MessageRepository, ProfileRepository, StoreClient,
    UserRepository,
};
pub use types::{Attribute, Item, KeyCondition, QueryPage, Record};
