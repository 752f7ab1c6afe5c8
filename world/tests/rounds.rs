use ricochet_core::{
    CellCoord, Command, Direction, Event, Phase, PlayerId, PlayerScore, RobotColor,
    TurnEndReason,
};
use ricochet_world::{self as world, query, Config, Placement, World, DEFAULT_TURN_BUDGET};

/// Red on its home cell, green directly below column 1 so that red stops at
/// (4,1) when sliding down, yellow on its home cell, blue one slide away
/// from its (13,9) target.
const PLACEMENT: [CellCoord; 4] = [
    CellCoord::new(1, 1),
    CellCoord::new(5, 1),
    CellCoord::new(13, 5),
    CellCoord::new(13, 12),
];

fn started(player_count: u32) -> World {
    let config = Config::new(7, DEFAULT_TURN_BUDGET).with_placement(Placement::Fixed(PLACEMENT));
    let mut world = World::with_config(config);
    let _ = run(&mut world, Command::StartGame { player_count });
    world
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

fn bid(world: &mut World, player: u32, steps: u32) -> Vec<Event> {
    run(
        world,
        Command::SubmitBid {
            player: PlayerId::new(player),
            steps,
        },
    )
}

fn slide(world: &mut World, direction: Direction) -> Vec<Event> {
    run(world, Command::Slide { direction })
}

fn time_out(world: &mut World) -> Vec<Event> {
    let turn = query::active_turn(world).expect("a turn is running");
    let mut events = Vec::new();
    for _ in 0..DEFAULT_TURN_BUDGET {
        world::apply(world, Command::ElapseTimeUnit { turn }, &mut events);
    }
    events
}

#[test]
fn second_bidder_scores_after_first_misses() {
    let mut world = started(2);
    assert_eq!(query::phase(&world), Phase::Bidding);
    assert_eq!(query::active_robot(&world), Some(RobotColor::Red));
    assert_eq!(
        query::spawn_position(&world, RobotColor::Red),
        CellCoord::new(1, 1)
    );

    assert_eq!(
        bid(&mut world, 0, 1),
        vec![Event::BidAccepted {
            player: PlayerId::new(0),
            steps: 1
        }]
    );
    let events = bid(&mut world, 1, 3);
    assert!(events.contains(&Event::TurnOrderDecided {
        order: vec![PlayerId::new(0), PlayerId::new(1)]
    }));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::TurnStarted {
            player,
            bid: 1,
            time_budget: DEFAULT_TURN_BUDGET,
            ..
        } if *player == PlayerId::new(0)
    )));
    assert_eq!(query::phase(&world), Phase::TurnActive);
    assert_eq!(query::active_player(&world), Some(PlayerId::new(0)));

    let events = slide(&mut world, Direction::Down);
    assert_eq!(
        events.first(),
        Some(&Event::RobotMoved {
            color: RobotColor::Red,
            from: CellCoord::new(1, 1),
            to: CellCoord::new(4, 1),
        })
    );
    assert!(events.contains(&Event::SlideResolved {
        player: PlayerId::new(0),
        color: RobotColor::Red,
        direction: Direction::Down,
        to: CellCoord::new(4, 1),
        cells_traversed: 3,
        used_moves: 1,
    }));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::TurnEnded {
            reason: TurnEndReason::BidExhausted,
            ..
        }
    )));
    assert!(events.contains(&Event::RobotMoved {
        color: RobotColor::Red,
        from: CellCoord::new(4, 1),
        to: CellCoord::new(1, 1),
    }));
    assert_eq!(
        query::robot_position(&world, RobotColor::Red),
        CellCoord::new(1, 1)
    );
    assert_eq!(query::active_player(&world), Some(PlayerId::new(1)));

    let _ = slide(&mut world, Direction::Down);
    let events = slide(&mut world, Direction::Right);
    let won_at = events
        .iter()
        .position(|event| {
            *event
                == Event::RoundWon {
                    player: PlayerId::new(1),
                    color: RobotColor::Red,
                }
        })
        .expect("round won");
    assert_eq!(
        &events[won_at + 1..],
        &[
            Event::RoundCompleted {
                color: RobotColor::Red,
                winner: Some(PlayerId::new(1)),
            },
            Event::RoundStarted {
                color: RobotColor::Green,
                round: 2,
            },
        ]
    );

    let scores: Vec<u32> = query::players(&world)
        .iter()
        .map(|player| player.score())
        .collect();
    assert_eq!(scores, vec![0, 1]);
    assert_eq!(
        query::robot_position(&world, RobotColor::Red),
        CellCoord::new(4, 2)
    );
    assert_eq!(query::active_robot(&world), Some(RobotColor::Green));
    assert_eq!(
        query::spawn_position(&world, RobotColor::Green),
        CellCoord::new(5, 1)
    );
    assert_eq!(query::expected_bidder(&world), Some(PlayerId::new(0)));
    assert!(query::players(&world)
        .iter()
        .all(|player| player.bid().is_none()));
}

#[test]
fn timeout_leaves_same_state_as_exhausted_bid() {
    let mut exhausted = started(2);
    let _ = bid(&mut exhausted, 0, 2);
    let _ = bid(&mut exhausted, 1, 3);
    let _ = slide(&mut exhausted, Direction::Down);
    let _ = slide(&mut exhausted, Direction::Up);

    let mut timed_out = started(2);
    let _ = bid(&mut timed_out, 0, 2);
    let _ = bid(&mut timed_out, 1, 3);
    let _ = slide(&mut timed_out, Direction::Down);
    let events = time_out(&mut timed_out);

    assert!(events.iter().any(|event| matches!(
        event,
        Event::TimeRemaining { seconds: 0, .. }
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::TurnEnded {
            reason: TurnEndReason::TimedOut,
            ..
        }
    )));

    assert_eq!(query::phase(&timed_out), query::phase(&exhausted));
    assert_eq!(
        query::robot_cells(&timed_out),
        query::robot_cells(&exhausted)
    );
    assert_eq!(
        query::active_player(&timed_out),
        query::active_player(&exhausted)
    );
    assert_eq!(query::time_remaining(&timed_out), DEFAULT_TURN_BUDGET);
    assert_eq!(query::time_remaining(&exhausted), DEFAULT_TURN_BUDGET);
}

#[test]
fn countdown_reports_each_remaining_unit() {
    let mut world = started(1);
    let _ = bid(&mut world, 0, 4);
    let turn = query::active_turn(&world).expect("turn running");

    let events = run(&mut world, Command::ElapseTimeUnit { turn });
    assert_eq!(
        events,
        vec![Event::TimeRemaining {
            turn,
            seconds: DEFAULT_TURN_BUDGET - 1
        }]
    );
    assert_eq!(query::time_remaining(&world), DEFAULT_TURN_BUDGET - 1);
}

#[test]
fn round_without_winner_bids_again_for_same_robot() {
    let mut world = started(2);
    let _ = bid(&mut world, 0, 0);
    let events = bid(&mut world, 1, 0);

    let ended = events
        .iter()
        .filter(|event| matches!(event, Event::TurnEnded { .. }))
        .count();
    assert_eq!(ended, 2);
    assert_eq!(
        &events[events.len() - 2..],
        &[
            Event::RoundCompleted {
                color: RobotColor::Red,
                winner: None,
            },
            Event::RoundStarted {
                color: RobotColor::Red,
                round: 2,
            },
        ]
    );
    assert_eq!(query::phase(&world), Phase::Bidding);
    assert_eq!(query::expected_bidder(&world), Some(PlayerId::new(0)));
}

#[test]
fn zero_bid_is_skipped_in_favour_of_next_player() {
    let mut world = started(2);
    let _ = bid(&mut world, 0, 0);
    let events = bid(&mut world, 1, 1);

    assert!(events.iter().any(|event| matches!(
        event,
        Event::TurnEnded {
            player,
            reason: TurnEndReason::BidExhausted,
            ..
        } if *player == PlayerId::new(0)
    )));
    assert_eq!(query::phase(&world), Phase::TurnActive);
    assert_eq!(query::active_player(&world), Some(PlayerId::new(1)));
}

#[test]
fn wasted_slide_still_costs_a_move() {
    let mut world = started(1);
    let _ = bid(&mut world, 0, 3);
    let _ = slide(&mut world, Direction::Down);

    let events = slide(&mut world, Direction::Down);
    assert_eq!(
        events,
        vec![Event::SlideResolved {
            player: PlayerId::new(0),
            color: RobotColor::Red,
            direction: Direction::Down,
            to: CellCoord::new(4, 1),
            cells_traversed: 0,
            used_moves: 2,
        }]
    );
    assert_eq!(query::players(&world)[0].moves_left(), 1);
}

#[test]
fn scoring_every_robot_ends_the_game() {
    let mut world = started(1);
    let plan: [(u32, &[Direction]); 4] = [
        (2, &[Direction::Down, Direction::Right]),
        (1, &[Direction::Down]),
        (3, &[Direction::Up, Direction::Left, Direction::Up]),
        (1, &[Direction::Left]),
    ];

    let mut last = Vec::new();
    for (steps, slides) in plan {
        let _ = bid(&mut world, 0, steps);
        for direction in slides {
            last = slide(&mut world, *direction);
        }
    }

    assert_eq!(query::phase(&world), Phase::GameOver);
    assert_eq!(query::active_robot(&world), None);
    assert_eq!(
        last.last(),
        Some(&Event::GameOver {
            ranking: vec![PlayerScore {
                player: PlayerId::new(0),
                name: "1".to_owned(),
                score: 4,
            }]
        })
    );
    assert_eq!(
        query::robot_cells(&world),
        [
            CellCoord::new(4, 2),
            CellCoord::new(12, 1),
            CellCoord::new(2, 3),
            CellCoord::new(13, 9)
        ]
    );
}

#[test]
fn ranking_lists_every_player_by_descending_score() {
    let mut world = started(3);
    let _ = bid(&mut world, 0, 5);
    let _ = bid(&mut world, 1, 5);
    let _ = bid(&mut world, 2, 2);
    let _ = slide(&mut world, Direction::Down);
    let _ = slide(&mut world, Direction::Right);
    assert_eq!(query::players(&world)[2].score(), 1);

    let tail: [(u32, &[Direction]); 3] = [
        (1, &[Direction::Down]),
        (3, &[Direction::Up, Direction::Left, Direction::Up]),
        (1, &[Direction::Left]),
    ];
    let mut last = Vec::new();
    for (steps, slides) in tail {
        let _ = bid(&mut world, 0, steps);
        let _ = bid(&mut world, 1, steps + 1);
        let _ = bid(&mut world, 2, steps + 1);
        for direction in slides {
            last = slide(&mut world, *direction);
        }
    }

    let Some(Event::GameOver { ranking }) = last.last() else {
        panic!("expected game over, got {last:?}");
    };
    let ordered: Vec<(PlayerId, u32)> = ranking
        .iter()
        .map(|line| (line.player, line.score))
        .collect();
    assert_eq!(ordered[0], (PlayerId::new(0), 3));
    assert_eq!(ordered[1], (PlayerId::new(2), 1));
    assert_eq!(ordered[2], (PlayerId::new(1), 0));
}

#[test]
fn equal_bids_keep_every_player_in_turn_order() {
    let mut world = started(4);
    for player in 0..4 {
        let _ = bid(&mut world, player, 2);
    }

    let mut order = query::turn_order(&world).to_vec();
    assert_eq!(order.len(), 4);
    order.sort();
    assert_eq!(order, (0..4).map(PlayerId::new).collect::<Vec<_>>());
}

#[test]
fn landing_on_another_colors_target_does_not_score() {
    let mut world = started(1);
    let _ = bid(&mut world, 0, 2);

    let events = slide(&mut world, Direction::Right);
    assert!(events.contains(&Event::SlideResolved {
        player: PlayerId::new(0),
        color: RobotColor::Red,
        direction: Direction::Right,
        to: CellCoord::new(1, 9),
        cells_traversed: 8,
        used_moves: 1,
    }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::RoundWon { .. })));
    assert_eq!(query::players(&world)[0].score(), 0);
    assert_eq!(query::active_robot(&world), Some(RobotColor::Red));
    assert_eq!(query::phase(&world), Phase::TurnActive);
}
