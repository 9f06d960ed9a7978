//! Auxiliary Enumerations
//!
//! Enum kecil yang dipakai di dalam field datagram. Pola mapping sama
//! dengan `DatagramType`: tabel statis + fallback `Unknown`.

wire_enum! {
    /// Alasan penutupan koneksi (field `Shutdown`)
    pub enum EndConnectionReason {
        Shutdown => (0x00, "Shutdown"),
        TimeOut => (0x01, "TimeOut"),
        Unknown => (0xAA, "Unknown"),
    }
}

wire_enum! {
    /// Aksi pada `ObjectRequest`
    pub enum ObjectRequestAction {
        Create => (0x01, "Create"),
        Update => (0x02, "Update"),
        Delete => (0x04, "Delete"),
        Subscribe => (0x08, "Subscribe"),
        Unsubscribe => (0x10, "Unsubscribe"),
        Unknown => (0xAA, "Unknown"),
    }
}

wire_enum! {
    /// Aksi pada `TopicRequest`
    pub enum TopicAction {
        Subscribe => (0x00, "Subscribe"),
        Unsubscribe => (0xFF, "Unsubscribe"),
        Unknown => (0xAA, "Unknown"),
    }
}

wire_enum! {
    /// Status balasan untuk `TopicRequest`
    pub enum TopicResponse {
        SubSuccess => (0x00, "SubSuccess"),
        SubFailure => (0x0F, "SubFailure"),
        UnsubSuccess => (0xF0, "UnsubSuccess"),
        UnsubFailure => (0xFF, "UnsubFailure"),
        Unknown => (0xAA, "Unknown"),
    }
}

impl TopicResponse {
    /// True for `SubSuccess` / `UnsubSuccess`
    pub fn is_success(self) -> bool {
        matches!(self, Self::SubSuccess | Self::UnsubSuccess)
    }
}
