use quickcheck::{quickcheck, TestResult};
use ricochet_core::{Command, Event, PlayerId};
use ricochet_world::{self as world, query, Config, World, DEFAULT_TURN_BUDGET};

#[test]
fn turn_order_is_non_decreasing_in_bid() {
    fn property(seed: u64, bids: Vec<u8>) -> TestResult {
        let bids: Vec<u8> = bids.into_iter().take(8).collect();
        if bids.is_empty() {
            return TestResult::discard();
        }

        let mut world = World::with_config(Config::new(seed, DEFAULT_TURN_BUDGET));
        let mut events = Vec::new();
        let player_count = u32::try_from(bids.len()).expect("at most eight players");
        world::apply(&mut world, Command::StartGame { player_count }, &mut events);

        for (player, steps) in (0..player_count).zip(&bids) {
            world::apply(
                &mut world,
                Command::SubmitBid {
                    player: PlayerId::new(player),
                    steps: u32::from(*steps % 6) + 1,
                },
                &mut events,
            );
        }

        let order = events.iter().find_map(|event| match event {
            Event::TurnOrderDecided { order } => Some(order.clone()),
            _ => None,
        });
        let Some(order) = order else {
            return TestResult::error("turn order never decided");
        };

        let bid_of = |player: &PlayerId| {
            query::players(&world)[player.index()]
                .bid()
                .unwrap_or_default()
        };
        let mut sorted = order.clone();
        sorted.sort();
        let everyone_once = sorted == (0..player_count).map(PlayerId::new).collect::<Vec<_>>();
        let ascending = order.windows(2).all(|pair| bid_of(&pair[0]) <= bid_of(&pair[1]));

        TestResult::from_bool(everyone_once && ascending)
    }

    quickcheck(property as fn(u64, Vec<u8>) -> TestResult);
}
