use events_core::{MapSurface, Marker};

/// Map surface that keeps its markers as text pins.
#[derive(Debug, Default)]
pub struct TextMap {
    pins: Vec<String>,
}

impl TextMap {
    pub fn pins(&self) -> &[String] {
        &self.pins
    }
}

impl MapSurface for TextMap {
    fn clear_markers(&mut self) {
        self.pins.clear();
    }

    fn add_marker(&mut self, marker: &Marker) {
        let popup = marker.popup_text().replace('\n', " @ ");
        self.pins.push(format!(
            "({:>9.4}, {:>9.4})  {popup}",
            marker.coordinate.latitude, marker.coordinate.longitude
        ));
    }
}
