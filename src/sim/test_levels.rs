//! Small hand-built levels shared by the simulation tests

/// Player spawner at (0,0) and machine spawners at (16,0) and (32,0), on a
/// short floor
pub const SPAWNERS: &str = r#"{
    "tilemap": {
        "0;0": {"type": "spawners", "variant": 0, "pos": [0, 0]},
        "1;0": {"type": "spawners", "variant": 1, "pos": [1, 0]},
        "2;0": {"type": "spawners", "variant": 1, "pos": [2, 0]},
        "0;1": {"type": "grass", "variant": 1, "pos": [0, 1]},
        "1;1": {"type": "grass", "variant": 1, "pos": [1, 1]},
        "2;1": {"type": "grass", "variant": 1, "pos": [2, 1]},
        "3;1": {"type": "grass", "variant": 1, "pos": [3, 1]}
    },
    "tile_size": 16,
    "offgrid": []
}"#;

/// Floor along row 4 from x 0 to 15, player at (16,48), three bottles to
/// the right of it and one leafy tree
pub const BOTTLES: &str = r#"{
    "tilemap": {
        "0;4": {"type": "grass", "variant": 0, "pos": [0, 4]},
        "1;4": {"type": "grass", "variant": 0, "pos": [1, 4]},
        "2;4": {"type": "grass", "variant": 0, "pos": [2, 4]},
        "3;4": {"type": "grass", "variant": 0, "pos": [3, 4]},
        "4;4": {"type": "grass", "variant": 0, "pos": [4, 4]},
        "5;4": {"type": "grass", "variant": 0, "pos": [5, 4]},
        "6;4": {"type": "grass", "variant": 0, "pos": [6, 4]},
        "7;4": {"type": "grass", "variant": 0, "pos": [7, 4]},
        "8;4": {"type": "stone", "variant": 0, "pos": [8, 4]},
        "9;4": {"type": "stone", "variant": 0, "pos": [9, 4]},
        "10;4": {"type": "stone", "variant": 0, "pos": [10, 4]},
        "11;4": {"type": "stone", "variant": 0, "pos": [11, 4]},
        "12;4": {"type": "stone", "variant": 0, "pos": [12, 4]},
        "13;4": {"type": "stone", "variant": 0, "pos": [13, 4]},
        "14;4": {"type": "stone", "variant": 0, "pos": [14, 4]},
        "15;4": {"type": "stone", "variant": 0, "pos": [15, 4]},
        "1;3": {"type": "spawners", "variant": 0, "pos": [1, 3]},
        "3;3": {"type": "water", "variant": 0, "pos": [3, 3]},
        "5;3": {"type": "water", "variant": 0, "pos": [5, 3]},
        "7;3": {"type": "water", "variant": 0, "pos": [7, 3]},
        "2;3": {"type": "decor", "variant": 1, "pos": [2, 3]}
    },
    "tile_size": 16,
    "offgrid": [
        {"type": "large_decor", "variant": 2, "pos": [160.0, 0.0]}
    ]
}"#;

/// Player alone on a floor: cleared from the first frame
pub const EMPTY: &str = r#"{
    "tilemap": {
        "0;4": {"type": "grass", "variant": 0, "pos": [0, 4]},
        "1;4": {"type": "grass", "variant": 0, "pos": [1, 4]},
        "2;4": {"type": "grass", "variant": 0, "pos": [2, 4]},
        "3;4": {"type": "grass", "variant": 0, "pos": [3, 4]},
        "4;4": {"type": "grass", "variant": 0, "pos": [4, 4]},
        "5;4": {"type": "grass", "variant": 0, "pos": [5, 4]},
        "1;3": {"type": "spawners", "variant": 0, "pos": [1, 3]}
    },
    "tile_size": 16,
    "offgrid": []
}"#;

/// Player at (32,48) with a machine at (96,48) in open line of fire
pub const GUNNER: &str = r#"{
    "tilemap": {
        "0;4": {"type": "grass", "variant": 0, "pos": [0, 4]},
        "1;4": {"type": "grass", "variant": 0, "pos": [1, 4]},
        "2;4": {"type": "grass", "variant": 0, "pos": [2, 4]},
        "3;4": {"type": "grass", "variant": 0, "pos": [3, 4]},
        "4;4": {"type": "grass", "variant": 0, "pos": [4, 4]},
        "5;4": {"type": "grass", "variant": 0, "pos": [5, 4]},
        "6;4": {"type": "grass", "variant": 0, "pos": [6, 4]},
        "7;4": {"type": "grass", "variant": 0, "pos": [7, 4]},
        "2;3": {"type": "spawners", "variant": 0, "pos": [2, 3]},
        "6;3": {"type": "spawners", "variant": 1, "pos": [6, 3]}
    },
    "tile_size": 16,
    "offgrid": []
}"#;

/// Same as [`GUNNER`] with a stone block at cell (4,3) shielding the player
pub const SHIELDED: &str = r#"{
    "tilemap": {
        "0;4": {"type": "grass", "variant": 0, "pos": [0, 4]},
        "1;4": {"type": "grass", "variant": 0, "pos": [1, 4]},
        "2;4": {"type": "grass", "variant": 0, "pos": [2, 4]},
        "3;4": {"type": "grass", "variant": 0, "pos": [3, 4]},
        "4;4": {"type": "grass", "variant": 0, "pos": [4, 4]},
        "5;4": {"type": "grass", "variant": 0, "pos": [5, 4]},
        "6;4": {"type": "grass", "variant": 0, "pos": [6, 4]},
        "7;4": {"type": "grass", "variant": 0, "pos": [7, 4]},
        "4;3": {"type": "stone", "variant": 0, "pos": [4, 3]},
        "2;3": {"type": "spawners", "variant": 0, "pos": [2, 3]},
        "6;3": {"type": "spawners", "variant": 1, "pos": [6, 3]}
    },
    "tile_size": 16,
    "offgrid": []
}"#;
