pub mod model;

pub use model::{
    IdenticalUsers, InvalidTarget, Like, LikeResult, LikeTarget, Match, MatchPolicy, Message,
    UserPair,
};
