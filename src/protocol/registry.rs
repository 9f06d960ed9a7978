//! Datagram Type Registry
//!
//! Tabel kode wire bersifat statis: `(variant, code, display name)`.
//! Menambah variant = menambah satu baris tabel. Kode yang sudah dipakai
//! TIDAK BOLEH diubah (on-wire compatibility).
//!
//! Byte yang tidak dikenal selalu dipetakan ke `Unknown` (bukan error).
//! `Unknown` punya kode reserved sendiri sehingga re-encode tetap lossless.

/// Generate a closed wire enumeration backed by a static code table.
///
/// Variant order in the table must match declaration order; `to_code` and
/// `display_name` index the table by discriminant. The last variant must be
/// `Unknown`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($code:expr, $label:expr), )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Static code table: (variant, wire code, display name)
            pub const TABLE: &'static [($name, u8, &'static str)] = &[
                $( ($name::$variant, $code, $label), )+
            ];

            /// Map a wire byte to a variant; unassigned bytes map to `Unknown`.
            #[inline]
            pub fn from_code(code: u8) -> Self {
                Self::TABLE
                    .iter()
                    .find(|(_, c, _)| *c == code)
                    .map(|(variant, _, _)| *variant)
                    .unwrap_or(Self::Unknown)
            }

            /// Wire byte for this variant (stable, `Unknown` included).
            #[inline(always)]
            pub fn to_code(self) -> u8 {
                Self::TABLE[self as usize].1
            }

            /// Human-readable label, for logs only.
            #[inline(always)]
            pub fn display_name(self) -> &'static str {
                Self::TABLE[self as usize].2
            }

            #[inline(always)]
            pub fn is_unknown(self) -> bool {
                self == Self::Unknown
            }
        }

        impl From<u8> for $name {
            #[inline]
            fn from(code: u8) -> Self {
                Self::from_code(code)
            }
        }

        impl From<$name> for u8 {
            #[inline]
            fn from(value: $name) -> u8 {
                value.to_code()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.display_name())
            }
        }
    };
}

wire_enum! {
    /// Tipe datagram - selalu byte pertama di wire
    pub enum DatagramType {
        Connect => (0xF0, "Connect"),
        ConnectAck => (0xF1, "Connect_ACK"),
        ConnectNack => (0xF2, "Connect_NACK"),
        Shutdown => (0xFF, "Shutdown"),
        /// Registered, no wire layout yet
        OpenStream => (0xFA, "Open_Stream"),
        ServerStatus => (0x30, "Server_Status"),
        ServerStatusAck => (0x00, "Server_Status_Ack"),
        Heartbeat => (0x60, "HeartBeat"),
        HeartbeatRequest => (0x61, "HeartBeat_Request"),
        Ping => (0x62, "Ping"),
        Pong => (0x72, "Pong"),
        TopicRequest => (0x45, "Topic_Request"),
        TopicRequestAck => (0x05, "Topic_Request_Ack"),
        TopicRequestNack => (0x15, "Topic_Request_Nack"),
        ObjectRequest => (0x48, "Object_Request"),
        ObjectRequestAck => (0x08, "Object_Request_Ack"),
        ObjectRequestNack => (0x18, "Object_Request_Nack"),
        Data => (0x42, "Data"),
        Unknown => (0xAA, "Unknown"),
    }
}

/// Peek the type tag without decoding the rest.
///
/// Returns `None` for an empty slice.
#[inline(always)]
pub fn peek_type(buf: &[u8]) -> Option<DatagramType> {
    buf.first().map(|&code| DatagramType::from_code(code))
}
