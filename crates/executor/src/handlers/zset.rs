//! ZADD, ZSCORE, ZCARD, ZCOUNT, ZRANGE, ZRANGEBYSCORE, ZRANK, ZREM,
//! ZREMRANGEBYSCORE, ZINTERSTORE, ZUNIONSTORE — sorted-set operations.

use super::{arg_bool, arg_f64, arg_string, arg_uint, require_arity};
use crate::error::{Error, Result};
use crate::reply::Reply;
use kvengine_core::Arg;
use kvengine_primitives::sorted_set::{self, Aggregator};
use kvengine_primitives::SortedSet;
use kvengine_storage::{Store, Value};

fn zset_mut<'s>(store: &'s mut Store, key: &str) -> Result<&'s mut SortedSet> {
    if store.get(key).is_none() {
        store.insert(key.to_string(), Value::SortedSet(SortedSet::new()));
    }
    match store.get_mut(key) {
        Some(Value::SortedSet(z)) => Ok(z),
        Some(_) => Err(Error::WrongType),
        None => unreachable!("just inserted"),
    }
}

fn zset_ref<'s>(store: &'s Store, key: &str) -> Result<Option<&'s SortedSet>> {
    match store.get(key) {
        None => Ok(None),
        Some(Value::SortedSet(z)) => Ok(Some(z)),
        Some(_) => Err(Error::WrongType),
    }
}

fn flatten(members: Vec<(String, f64)>, with_scores: bool) -> Vec<String> {
    if with_scores {
        members.into_iter().flat_map(|(m, s)| vec![m, s.to_string()]).collect()
    } else {
        members.into_iter().map(|(m, _)| m).collect()
    }
}

/// `ZADD key score member [score member ...]`. Returns the count of members
/// that did not already exist; updating an existing member's score does not
/// count, even when the new score differs from the old one.
pub fn zadd(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 3)?;
    if (args.len() - 1) % 2 != 0 {
        return Err(Error::WrongArguments);
    }
    let key = arg_string(args, 0)?;

    // Validate every (score, member) pair before touching the store: a bad
    // score must fail the whole command without creating an empty key.
    let mut pairs = Vec::with_capacity((args.len() - 1) / 2);
    let mut i = 1;
    while i + 1 < args.len() {
        let score = arg_f64(args, i)?;
        let member = arg_string(args, i + 1)?;
        pairs.push((member, score));
        i += 2;
    }

    let zset = zset_mut(store, &key)?;
    let mut added = 0u64;
    for (member, score) in pairs {
        if zset.add(member, score) {
            added += 1;
        }
    }
    Ok(Reply::UInt(added))
}

/// `ZSCORE key member`.
pub fn zscore(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 2)?;
    let key = arg_string(args, 0)?;
    let member = arg_string(args, 1)?;
    match zset_ref(store, &key)? {
        None => Ok(Reply::Null),
        Some(z) => Ok(z.score(&member).map(Reply::Double).unwrap_or(Reply::Null)),
    }
}

/// `ZCARD key`.
pub fn zcard(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 1)?;
    let key = arg_string(args, 0)?;
    Ok(Reply::UInt(zset_ref(store, &key)?.map(SortedSet::len).unwrap_or(0) as u64))
}

/// `ZCOUNT key min min_inclusive max max_inclusive`.
pub fn zcount(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 5)?;
    let key = arg_string(args, 0)?;
    let min = arg_f64(args, 1)?;
    let min_inclusive = arg_bool(args, 2)?;
    let max = arg_f64(args, 3)?;
    let max_inclusive = arg_bool(args, 4)?;
    let count = zset_ref(store, &key)?
        .map(|z| z.count(min, min_inclusive, max, max_inclusive))
        .unwrap_or(0);
    Ok(Reply::UInt(count as u64))
}

/// `ZRANGE key start stop with_scores`.
pub fn zrange(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 4)?;
    let key = arg_string(args, 0)?;
    let start = arg_uint(args, 1)? as usize;
    let stop = arg_uint(args, 2)? as usize;
    let with_scores = arg_bool(args, 3)?;
    let members = zset_ref(store, &key)?.map(|z| z.range_by_rank(start, stop)).unwrap_or_default();
    Ok(Reply::List(flatten(members, with_scores)))
}

/// `ZRANGEBYSCORE key min min_inclusive max max_inclusive with_scores`.
pub fn zrangebyscore(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 6)?;
    let key = arg_string(args, 0)?;
    let min = arg_f64(args, 1)?;
    let min_inclusive = arg_bool(args, 2)?;
    let max = arg_f64(args, 3)?;
    let max_inclusive = arg_bool(args, 4)?;
    let with_scores = arg_bool(args, 5)?;
    let members = zset_ref(store, &key)?
        .map(|z| z.range_by_score(min, min_inclusive, max, max_inclusive))
        .unwrap_or_default();
    Ok(Reply::List(flatten(members, with_scores)))
}

/// `ZRANK key member reverse`.
pub fn zrank(store: &Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 3)?;
    let key = arg_string(args, 0)?;
    let member = arg_string(args, 1)?;
    let reverse = arg_bool(args, 2)?;
    match zset_ref(store, &key)? {
        None => Ok(Reply::Null),
        Some(z) => Ok(z.rank(&member, reverse).map(|r| Reply::UInt(r as u64)).unwrap_or(Reply::Null)),
    }
}

/// `ZREM key member`. No-op (not an error) if the member is absent.
pub fn zrem(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 2)?;
    let key = arg_string(args, 0)?;
    let member = arg_string(args, 1)?;
    match store.get_mut(&key) {
        None => Ok(Reply::Bool(false)),
        Some(Value::SortedSet(z)) => Ok(Reply::Bool(z.remove(&member))),
        Some(_) => Err(Error::WrongType),
    }
}

/// `ZREMRANGEBYSCORE key min min_inclusive max max_inclusive`. Returns the
/// count removed.
pub fn zremrangebyscore(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    require_arity(args, 5)?;
    let key = arg_string(args, 0)?;
    let min = arg_f64(args, 1)?;
    let min_inclusive = arg_bool(args, 2)?;
    let max = arg_f64(args, 3)?;
    let max_inclusive = arg_bool(args, 4)?;
    match store.get_mut(&key) {
        None => Ok(Reply::UInt(0)),
        Some(Value::SortedSet(z)) => {
            Ok(Reply::UInt(z.remove_range_by_score(min, min_inclusive, max, max_inclusive) as u64))
        }
        Some(_) => Err(Error::WrongType),
    }
}

/// Shared parsing for `ZINTERSTORE`/`ZUNIONSTORE`:
/// `dest numkeys key [key ...] [WEIGHTS w [w ...]] [AGGREGATE SUM|MIN|MAX]`.
fn parse_store_op(store: &Store, args: &[Arg]) -> Result<(String, Vec<SortedSet>, Vec<f64>, Aggregator)> {
    require_arity(args, 2)?;
    let dest = arg_string(args, 0)?;
    let numkeys = arg_uint(args, 1)? as usize;
    if numkeys == 0 || args.len() < 2 + numkeys {
        return Err(Error::WrongArguments);
    }
    let mut sets = Vec::with_capacity(numkeys);
    for i in 0..numkeys {
        let key = arg_string(args, 2 + i)?;
        let zset = zset_ref(store, &key)?.cloned().unwrap_or_default();
        sets.push(zset);
    }

    let mut weights = vec![1.0f64; numkeys];
    let mut aggregator = Aggregator::Sum;
    let mut cursor = 2 + numkeys;

    if cursor < args.len() && arg_string(args, cursor)?.eq_ignore_ascii_case("WEIGHTS") {
        cursor += 1;
        if args.len() < cursor + numkeys {
            return Err(Error::WrongArguments);
        }
        for w in weights.iter_mut().take(numkeys) {
            *w = arg_f64(args, cursor)?;
            cursor += 1;
        }
    }

    if cursor < args.len() && arg_string(args, cursor)?.eq_ignore_ascii_case("AGGREGATE") {
        cursor += 1;
        aggregator = match arg_string(args, cursor)?.to_ascii_uppercase().as_str() {
            "SUM" => Aggregator::Sum,
            "MIN" => Aggregator::Min,
            "MAX" => Aggregator::Max,
            _ => return Err(Error::WrongArguments),
        };
    }

    Ok((dest, sets, weights, aggregator))
}

/// `ZINTERSTORE dest numkeys key [key ...] [WEIGHTS ...] [AGGREGATE ...]`.
/// Only members present in every input survive.
pub fn zinterstore(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    let (dest, sets, weights, aggregator) = parse_store_op(store, args)?;
    let refs: Vec<(&SortedSet, f64)> = sets.iter().zip(weights).collect();
    let result = sorted_set::intersect(&refs, aggregator);
    let card = result.len() as u64;
    store.insert(dest, Value::SortedSet(result));
    Ok(Reply::UInt(card))
}

/// `ZUNIONSTORE dest numkeys key [key ...] [WEIGHTS ...] [AGGREGATE ...]`.
/// Every member across every input survives.
pub fn zunionstore(store: &mut Store, args: &[Arg]) -> Result<Reply> {
    let (dest, sets, weights, aggregator) = parse_store_op(store, args)?;
    let refs: Vec<(&SortedSet, f64)> = sets.iter().zip(weights).collect();
    let result = sorted_set::union(&refs, aggregator);
    let card = result.len() as u64;
    store.insert(dest, Value::SortedSet(result));
    Ok(Reply::UInt(card))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::new(1)
    }

    fn seed(store: &mut Store, key: &str, pairs: &[(f64, &str)]) {
        for (score, member) in pairs {
            zadd(store, &[Arg::from(key), Arg::from(*score), Arg::from(*member)]).unwrap();
        }
    }

    #[test]
    fn zadd_reports_only_new_members() {
        let mut s = store();
        assert_eq!(zadd(&mut s, &[Arg::from("z"), Arg::from(1.0), Arg::from("a")]).unwrap(), Reply::UInt(1));
        assert_eq!(zadd(&mut s, &[Arg::from("z"), Arg::from(1.0), Arg::from("a")]).unwrap(), Reply::UInt(0));
    }

    #[test]
    fn zcount_inclusive_vs_exclusive_matches_scenario() {
        let mut s = store();
        seed(&mut s, "scores", &[(1.0, "a"), (2.0, "b"), (3.0, "c"), (4.0, "d"), (5.0, "e")]);
        let inclusive = zcount(&s, &[Arg::from("scores"), Arg::from(1.0), Arg::from("true"), Arg::from(5.0), Arg::from("true")]).unwrap();
        assert_eq!(inclusive, Reply::UInt(5));
        let exclusive = zcount(&s, &[Arg::from("scores"), Arg::from(1.0), Arg::from("false"), Arg::from(5.0), Arg::from("false")]).unwrap();
        assert_eq!(exclusive, Reply::UInt(3));
    }

    #[test]
    fn zscore_and_zcard() {
        let mut s = store();
        seed(&mut s, "z", &[(1.0, "a"), (2.0, "b")]);
        assert_eq!(zscore(&s, &[Arg::from("z"), Arg::from("a")]).unwrap(), Reply::Double(1.0));
        assert_eq!(zscore(&s, &[Arg::from("z"), Arg::from("missing")]).unwrap(), Reply::Null);
        assert_eq!(zcard(&s, &[Arg::from("z")]).unwrap(), Reply::UInt(2));
    }

    #[test]
    fn zrank_and_zrem() {
        let mut s = store();
        seed(&mut s, "z", &[(1.0, "a"), (2.0, "b"), (3.0, "c")]);
        assert_eq!(zrank(&s, &[Arg::from("z"), Arg::from("b"), Arg::from("false")]).unwrap(), Reply::UInt(1));
        assert_eq!(zrem(&mut s, &[Arg::from("z"), Arg::from("b")]).unwrap(), Reply::Bool(true));
        assert_eq!(zrem(&mut s, &[Arg::from("z"), Arg::from("b")]).unwrap(), Reply::Bool(false));
    }

    #[test]
    fn zinterstore_matches_scenario_five() {
        let mut s = store();
        seed(&mut s, "z1", &[(1.0, "a"), (2.0, "b"), (3.0, "c")]);
        seed(&mut s, "z2", &[(3.0, "c"), (4.0, "b"), (5.0, "d")]);
        let reply = zinterstore(
            &mut s,
            &[Arg::from("dest"), Arg::from(2u64), Arg::from("z1"), Arg::from("z2"), Arg::from("AGGREGATE"), Arg::from("SUM")],
        )
        .unwrap();
        assert_eq!(reply, Reply::UInt(2));
        assert_eq!(zscore(&s, &[Arg::from("dest"), Arg::from("b")]).unwrap(), Reply::Double(6.0));
        assert_eq!(zscore(&s, &[Arg::from("dest"), Arg::from("c")]).unwrap(), Reply::Double(6.0));
    }

    #[test]
    fn zunionstore_matches_scenario_six() {
        let mut s = store();
        seed(&mut s, "z1", &[(1.0, "a"), (2.0, "b")]);
        seed(&mut s, "z2", &[(3.0, "b"), (4.0, "c")]);
        let reply = zunionstore(&mut s, &[Arg::from("dest"), Arg::from(2u64), Arg::from("z1"), Arg::from("z2")]).unwrap();
        assert_eq!(reply, Reply::UInt(3));
        assert_eq!(zscore(&s, &[Arg::from("dest"), Arg::from("a")]).unwrap(), Reply::Double(1.0));
        assert_eq!(zscore(&s, &[Arg::from("dest"), Arg::from("b")]).unwrap(), Reply::Double(5.0));
        assert_eq!(zscore(&s, &[Arg::from("dest"), Arg::from("c")]).unwrap(), Reply::Double(4.0));
    }

    #[test]
    fn zadd_with_a_bad_score_creates_no_key() {
        let mut s = store();
        let err = zadd(&mut s, &[Arg::from("z"), Arg::from("not-a-number"), Arg::from("a")]).unwrap_err();
        assert_eq!(err, Error::WrongArguments);
        assert!(s.get("z").is_none());
    }

    #[test]
    fn operations_on_wrong_type_error() {
        let mut s = store();
        super::super::string::set(&mut s, &[Arg::from("k"), Arg::from("v")]).unwrap();
        assert_eq!(zadd(&mut s, &[Arg::from("k"), Arg::from(1.0), Arg::from("a")]), Err(Error::WrongType));
    }
}
