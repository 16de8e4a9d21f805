use std::io::Read;
use crate::error::Error;

mod chain;
mod chain_with;
mod take_while;
mod engram;
mod one_of;
mod token;
mod map;
mod and_then;
mod chain_repeat;

pub trait Parser {
    type Item;

    fn parse<R>(&mut self, r: &mut R) -> Result<Self::Item, Error> where Self:Sized, R: Read;

    fn chain<P>(self, second: P) -> self::chain::Chain<Self, P> 
    where
        Self: Sized,
        P: Parser,
    {
        self::chain::Chain::new(self, second)
    }

    fn chain_with<Q, F>(self, func: F) -> self::chain_with::ChainWith<Self, F>
    where
        Self: Sized,
        Q: Parser,
        F: Fn(&Self::Item) -> Q,
    {
        self::chain_with::ChainWith::new(self, func)
    }

    fn map<J, F>(self, func: F) -> self::map::Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> J,
    {
        self::map::Map::new(self, func)
    }

    fn and_then<J, F>(self, func: F) -> self::and_then::AndThen<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> Result<J, crate::error::Error>,
    {
        self::and_then::AndThen::new(self, func)
    }

    fn chain_repeat<Q, R>(self, repeat: Q, until: R) -> self::chain_repeat::ChainRepeat<Self, Q, R>
    where
        Self: Sized,
        Q: Parser,
        R: Parser,
    {
        self::chain_repeat::ChainRepeat::new(self, repeat, until)
    }
}
