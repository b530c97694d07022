#![no_main]

use libfuzzer_sys::fuzz_target;
use resolver::{
    AgentContext, GlobalPosition, ItemIndex, ItemRecord, LocationTracker, MapUi, RegionIndex,
    RegionRecord, ReplyHandlers, TravelAction, WorldHandle, WorldMapClient,
};

#[derive(Default)]
struct Sink {
    regions: usize,
}

impl RegionIndex for Sink {
    fn insert_region(&mut self, record: &RegionRecord) -> bool {
        self.regions += 1;
        !record.access.is_non_existent()
    }
}

impl ItemIndex for Sink {
    fn insert_item(&mut self, _record: ItemRecord) {}
}

impl LocationTracker for Sink {
    fn is_tracking_valid_location(&self) -> bool {
        self.regions % 2 == 1
    }

    fn is_tracking_double_click(&self) -> bool {
        false
    }

    fn tracked_position_global(&self) -> GlobalPosition {
        GlobalPosition::default()
    }

    fn track_location(&mut self, _position: GlobalPosition) {}
}

impl TravelAction for Sink {
    fn go_to(&mut self, _position: GlobalPosition) {}
}

impl MapUi for Sink {
    fn update_regions(&mut self, _found_null_sim: bool) {}
}

fuzz_target!(|data: &[u8]| {
    let mut client = WorldMapClient::with_limits(
        AgentContext::default(),
        Vec::<Vec<u8>>::new(),
        wire::Limits::for_testing(),
    );
    let _ = client.request_handle_region_with_callback(WorldHandle::ZERO, |_| {}, "", false);

    let (mut regions, mut items, mut location, mut travel, mut ui) =
        (Sink::default(), Sink::default(), Sink::default(), Sink::default(), Sink::default());

    let mut idx = 0usize;
    while idx < data.len() && idx < 4096 {
        let len = (data[idx] as usize % 200).saturating_add(1);
        idx += 1;
        let end = (idx + len).min(data.len());
        let frame = &data[idx..end];
        idx = end;

        let mut handlers =
            ReplyHandlers::new(&mut regions, &mut items, &mut location, &mut travel, &mut ui);
        let _ = client.handle_message(frame, &mut handlers);
    }
});
