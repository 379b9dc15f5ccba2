use fw_store::{FleetState, StationStatus};
use serde::Serialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSummary {
    pub total_stations:  usize,
    pub available:       usize,
    pub in_use:          usize,
    pub offline:         usize,
    pub total_ports:     u32,
    pub available_ports: u32,
    /// Occupied ports over the ports of stations that are not offline;
    /// `0.0` when there are none.  An offline station's ports are idle,
    /// not free, so they count toward neither side of the ratio.
    pub utilisation:     f64,
}

pub fn station_summary(fleet: &FleetState) -> StationSummary {
    let mut s = StationSummary::default();
    let (mut online_ports, mut online_free) = (0u32, 0u32);
    for station in fleet.stations() {
        s.total_stations += 1;
        match station.status {
            StationStatus::Available => s.available += 1,
            StationStatus::InUse     => s.in_use += 1,
            StationStatus::Offline   => s.offline += 1,
        }
        s.total_ports += station.total_ports;
        s.available_ports += station.available_ports;
        if station.status != StationStatus::Offline {
            online_ports += station.total_ports;
            online_free += station.available_ports;
        }
    }
    if online_ports > 0 {
        s.utilisation = f64::from(online_ports - online_free) / f64::from(online_ports);
    }
    s
}
