#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use bikefit::{
    Envelope, FitConstants, FitError, FitService, FrameGeometry, MemoryAnthropometryStore,
    MemoryFitSettingsStore, MemoryGeometryStore, RawMeasurements, ServiceError, StoreError,
};
use serde_json::json;

type Service = FitService<MemoryGeometryStore, MemoryAnthropometryStore, MemoryFitSettingsStore>;

const USER: u64 = 7;

fn reference_geometry() -> FrameGeometry {
    FrameGeometry {
        seat_angle: 73.0,
        head_angle: 71.0,
        crank_len: 170.0,
        max_stem_height: 50.0,
        reach: 390.0,
        stem_len: 100.0,
        bar_reach: 75.0,
        shifter_reach: 75.0,
        stack: 550.0,
        stem_angle: 0.0,
        saddle_rail_len: 50.0,
    }
}

fn raw() -> RawMeasurements {
    RawMeasurements {
        height: 1750.0,
        foot_length: 270.0,
        hip: 450.0,
        lower_leg: 440.0,
        torso_max: 550.0,
        upperarm: 320.0,
        forearm: 270.0,
    }
}

fn service() -> (Service, u64) {
    let mut geometry = MemoryGeometryStore::new();
    let size_id = geometry.add_bike_size(reference_geometry());
    let service = FitService::new(
        geometry,
        MemoryAnthropometryStore::new(),
        MemoryFitSettingsStore::new(),
    );
    (service, size_id)
}

#[test]
fn fit_requires_known_size_and_rider() {
    let (mut service, size_id) = service();

    assert_eq!(
        service.basic_fit(size_id + 1, USER),
        Err(ServiceError::Store(StoreError::UnknownBikeSize(size_id + 1)))
    );
    assert_eq!(
        service.basic_fit(size_id, USER),
        Err(ServiceError::Store(StoreError::NoAnthropometry(USER)))
    );

    service.add_anthropometry(USER, &raw());
    let fit = service.basic_fit(size_id, USER).expect("rider on record");
    assert_relative_eq!(fit.seat_height, 450.0 + 440.0 + 83.7 - 170.0, epsilon = 1.0e-9);
    assert_relative_eq!(fit.stem_height, 50.0);
}

#[test]
fn latest_measurements_are_used() {
    let (mut service, size_id) = service();
    service.add_anthropometry(USER, &raw());
    let first = service.basic_fit(size_id, USER).expect("solvable");

    service.add_anthropometry(USER, &RawMeasurements { hip: 470.0, ..raw() });
    let second = service.basic_fit(size_id, USER).expect("solvable");
    assert_relative_eq!(second.seat_height - first.seat_height, 20.0, epsilon = 1.0e-9);
    assert_relative_eq!(
        service.anthropometry(USER).expect("on record").hip,
        470.0
    );
}

#[test]
fn saved_fits_round_trip_by_name() {
    let (mut service, size_id) = service();
    service.add_anthropometry(USER, &raw());
    let fit = service.basic_fit(size_id, USER).expect("solvable");

    service
        .save_fit(USER, size_id, "  endurance ", fit)
        .expect("saved");
    service.save_fit(USER, size_id, "race", fit).expect("saved");
    assert_eq!(
        service.fit_names(USER, size_id),
        vec!["endurance".to_owned(), "race".to_owned()]
    );

    let named = service
        .fit_by_name(USER, size_id, "endurance")
        .expect("saved fit");
    assert_eq!(named.fit, fit);
    assert_eq!(named.size_id, size_id);

    service
        .delete_fit(USER, size_id, "endurance")
        .expect("deleted");
    assert_eq!(service.fit_names(USER, size_id), vec!["race".to_owned()]);
    assert!(matches!(
        service.fit_by_name(USER, size_id, "endurance"),
        Err(ServiceError::Store(StoreError::UnknownFit { .. }))
    ));
    assert!(service.fit_names(USER + 1, size_id).is_empty());
}

#[test]
fn infeasible_combination_surfaces_as_fit_error() {
    let (mut service, _) = service();
    let tiny_frame = service.geometry_store().add_bike_size(FrameGeometry {
        reach: 2_000.0,
        ..reference_geometry()
    });
    service.add_anthropometry(USER, &raw());

    let result = service.basic_fit(tiny_frame, USER);
    assert!(matches!(
        result,
        Err(ServiceError::Fit(FitError::GeometricallyInfeasible { .. }))
    ));

    let envelope = serde_json::to_value(Envelope::from(result)).expect("serializable");
    assert_eq!(envelope["success"], json!(false));
    assert_eq!(envelope["error"]["kind"], json!("geometrically_infeasible"));
}

#[test]
fn configured_constants_reach_the_solver() {
    let (service, size_id) = service();
    let mut service = service.with_constants(FitConstants {
        shifter_angle: 40.0,
        ..FitConstants::DEFAULT
    });
    service.add_anthropometry(USER, &raw());

    let fit = service.basic_fit(size_id, USER).expect("solvable");
    assert_relative_eq!(fit.shifter_angle, 40.0);

    let envelope = serde_json::to_value(Envelope::from(service.basic_fit(size_id, USER)))
        .expect("serializable");
    assert_eq!(envelope["success"], json!(true));
    assert_eq!(envelope["data"]["shifterAngle"], json!(40.0));
}
