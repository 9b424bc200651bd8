// GraphQL operations understood by the game backend

pub struct Operation {
    pub name: &'static str,
    pub query: &'static str,
}

pub const ZONES: Operation = Operation {
    name: "ZONES",
    query: r#"query ZONES {
  zones {
    id
  }
}"#,
};

pub const ZONE_EVENTS: Operation = Operation {
    name: "ZoneEvents",
    query: r#"query ZoneEvents($zone_id: Int!) {
  events: zone_events(
    where: {zone_id: {_eq: $zone_id}, reward_left: {_gt: 0}, end_time: {_gt: "now()"}}
    order_by: {spec: {event_type: asc}, end_time: desc}
  ) {
    id
    zone_id
    q
    r
    start_time
    end_time
    reward_left
    reward_type
    count_lurking_fleets
    spec {
      type: event_type
    }
  }
}"#,
};

pub const ZONE_STRUCTURES: Operation = Operation {
    name: "ZoneStructures",
    query: r#"query ZoneStructures($zone_id: Int!) {
  structures: zone_structures(
    where: {_and: {zone_id: {_eq: $zone_id}, _or: [{end_time: {_is_null: true}}, {end_time: {_gt: "now()"}}]}}
    order_by: {spec: {structure_type: asc}, end_time: desc_nulls_first}
  ) {
    id
    zone_id
    q
    r
    count_lurking_fleets
    spec {
      type: structure_type
      inputs {
        input_ratio
        input_type
      }
    }
  }
}"#,
};

pub const FLEETS: Operation = Operation {
    name: "FLEETS",
    query: r#"query FLEETS($player: uuid!) {
  fleets(where: {controller_id: {_eq: $player}}, order_by: {created_at: asc}) {
    id
    name
    state
    zone_id
    zone_pos
    zone_movement_end_time
    ships(order_by: {unit_slot: asc}) {
      id
      cargo {
        amount
        resource_type
      }
      is_damaged
    }
    current_zone_event {
      end_time
    }
  }
}"#,
};

pub const MOVE_FLEETS: Operation = Operation {
    name: "MoveFleets",
    query: r#"mutation MoveFleets($fleetIds: [uuid!], $targetPos: point!) {
  move: update_fleets(where: {id: {_in: $fleetIds}}, _set: {zone_target_pos: $targetPos}) {
    affected_rows
  }
}"#,
};

pub const LAUNCH_FLEETS: Operation = Operation {
    name: "LaunchFleets",
    query: r#"mutation LaunchFleets($inputs: [fleet_zone_events_insert_input!]!) {
  fleets: insert_fleet_zone_events(objects: $inputs) {
    affected_rows
  }
}"#,
};

/// Docking, fighting and structure interaction all insert a fleet zone event
pub const ASSIGN_EVENT_TO_FLEETS: Operation = Operation {
    name: "AssignEventToFleets",
    query: r#"mutation AssignEventToFleets($inputs: [fleet_zone_events_insert_input!]!, $target: point!) {
  fleets: insert_fleet_zone_events(objects: $inputs) {
    returning {
      start_time
      end_time
      fleet {
        id
        risk_at_zone_pos(args: {target: $target})
      }
    }
  }
}"#,
};

pub const CARGO_CHANGES: Operation = Operation {
    name: "UNLOAD_SHIP_CARGO",
    query: r#"mutation UNLOAD_SHIP_CARGO($unload_changes: [user_cargo_changes_insert_input!]!, $load_changes: [user_cargo_changes_insert_input!]!) {
  unload: insert_user_cargo_changes(objects: $unload_changes) {
    affected_rows
  }
  load: insert_user_cargo_changes(objects: $load_changes) {
    affected_rows
  }
}"#,
};

pub const USER_CARGO: Operation = Operation {
    name: "USER_CARGO",
    query: r#"query USER_CARGO($owner: uuid) {
  cargo: user_cargo(where: {user_id: {_eq: $owner}}) {
    amount
    resource_type
  }
}"#,
};
