//! Shared fixture: one complete turbine with realistic record tables.
//!
//! Anchors are a 20.0 m tower base and a -1.0 m pile head. The monopile
//! cans are [5000, 6000, 7000] mm high, putting the pile toe at -19.0 m;
//! the transition-piece cans span 25 m, overlapping the pile head so the
//! connection merge has a can to cut.

use uom::si::{f64::Length, length::meter};

use crate::records::{
    ElementKind, ElementRecord, LocationRecord, MaterialRecord, Position, Subassembly,
    SubassemblyRecord,
};

use super::TurbineGeometryProcessor;

fn element(title: &str, kind: ElementKind, z: f64) -> ElementRecord {
    ElementRecord {
        title: title.to_string(),
        kind,
        outer_diameter: None,
        height: None,
        wall_thickness: None,
        mass: 0.0,
        volume: None,
        x: 0.0,
        y: 0.0,
        z,
        moment_of_inertia: None,
        material: None,
        description: None,
    }
}

fn can(title: &str, od: &str, height: f64, wall: f64, mass: f64, volume: f64, z: f64) -> ElementRecord {
    ElementRecord {
        outer_diameter: Some(od.to_string()),
        height: Some(height),
        wall_thickness: Some(wall),
        mass,
        volume: Some(volume),
        ..element(title, ElementKind::Can, z)
    }
}

fn tower() -> SubassemblyRecord {
    let mut rna = element("rna", ElementKind::Rna, 31_000.0);
    rna.mass = 350_000.0;
    rna.moment_of_inertia = Some(Position {
        x: 1.2e8,
        y: 1.2e8,
        z: 5.0e7,
    });

    let mut flange = element("tw_platform", ElementKind::Appurtenance, 15_000.0);
    flange.mass = 2_000.0;
    flange.description = Some("platform flange".to_string());

    SubassemblyRecord {
        subassembly: Subassembly::Tower,
        position: Position {
            x: 0.0,
            y: 0.0,
            z: 20_000.0,
        },
        elements: vec![
            can("tw_can_1", "4000", 10_000.0, 30.0, 25_000.0, 3.2, 20_000.0),
            can("tw_can_2", "4500/4000", 10_000.0, 35.0, 28_000.0, 3.6, 10_000.0),
            can("tw_can_3", "5000/4500", 10_000.0, 40.0, 32_000.0, 4.1, 0.0),
            rna,
            flange,
        ],
    }
}

fn transition_piece() -> SubassemblyRecord {
    let mut boat_landing = element("tp_boat_landing", ElementKind::Appurtenance, 25_000.0);
    boat_landing.mass = 5_000.0;
    boat_landing.description = Some("boat landing".to_string());

    let mut ladder = element("tp_ladder", ElementKind::Appurtenance, 6_000.0);
    ladder.mass = 1_500.0;
    ladder.height = Some(12_000.0);
    ladder.volume = Some(0.2);
    ladder.description = Some("ladder".to_string());

    let mut grout = element("grout", ElementKind::Grout, 1_000.0);
    grout.mass = 8_000.0;
    grout.height = Some(6_000.0);
    grout.volume = Some(3.3);
    grout.description = Some("grout annulus".to_string());

    SubassemblyRecord {
        subassembly: Subassembly::TransitionPiece,
        position: Position {
            x: 0.0,
            y: 0.0,
            z: -5_000.0,
        },
        elements: vec![
            can("tp_can_1", "5600/5000", 9_000.0, 50.0, 58_266.0, 7.422, 16_000.0),
            can("tp_can_2", "5600", 8_000.0, 50.0, 54_747.0, 6.974, 8_000.0),
            // Tabulated volume matches the frustum shell so the connection
            // cut conserves mass tightly.
            can("tp_can_3", "6000/5600", 8_000.0, 60.0, 67_947.0, 8.6557, 0.0),
            boat_landing,
            ladder,
            grout,
        ],
    }
}

fn monopile() -> SubassemblyRecord {
    let mut anode = element("mp_anode", ElementKind::Appurtenance, 17_000.0);
    anode.mass = 500.0;
    anode.description = Some("anode bracket".to_string());

    let steel = |mut e: ElementRecord| {
        e.material = Some("S355".to_string());
        e
    };

    SubassemblyRecord {
        subassembly: Subassembly::Monopile,
        position: Position {
            x: 0.0,
            y: 0.0,
            z: -19_000.0,
        },
        elements: vec![
            steel(can("mp_can_1", "5000", 5_000.0, 60.0, 36_548.0, 4.6558, 13_000.0)),
            steel(can("mp_can_2", "5000", 6_000.0, 60.0, 43_858.0, 5.587, 7_000.0)),
            steel(can("mp_can_3", "5000", 7_000.0, 60.0, 51_168.0, 6.5182, 0.0)),
            anode,
        ],
    }
}

pub(crate) fn fixture_records() -> (Vec<MaterialRecord>, Vec<SubassemblyRecord>, LocationRecord) {
    let materials = vec![
        MaterialRecord {
            title: "S355".to_string(),
            density: 7_850.0,
            young_modulus: Some(200.0),
            poisson_ratio: Some(0.3),
        },
        MaterialRecord {
            title: "C90 grout".to_string(),
            density: 2_400.0,
            young_modulus: None,
            poisson_ratio: None,
        },
    ];
    let subassemblies = vec![tower(), transition_piece(), monopile()];
    let location = LocationRecord {
        title: "TST01".to_string(),
        elevation: -10.0,
    };
    (materials, subassemblies, location)
}

/// A processor with explicit anchors: tower base 20.0 m, pile head -1.0 m.
pub(crate) fn processor() -> TurbineGeometryProcessor {
    processor_with_pile_head(-1.0)
}

/// Same fixture with a custom pile head, for bolted-connection scenarios.
pub(crate) fn processor_with_pile_head(pile_head: f64) -> TurbineGeometryProcessor {
    let (materials, subassemblies, location) = fixture_records();
    TurbineGeometryProcessor::new(
        materials,
        subassemblies,
        &location,
        Some(Length::new::<meter>(20.0)),
        Some(Length::new::<meter>(pile_head)),
    )
    .expect("fixture records are complete")
}
