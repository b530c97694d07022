use wire::{
    decode_frame, decode_message, AgentData, DecodeError, Limits, MapBlockData, MapBlockReply,
    MapBlockRequest, MapItemData, MapItemReply, MapItemRequest, MapNameRequest, Message,
    MessageTag, ReplyAgentData, Uuid, WireMessage, HEADER_SIZE, LAYER_FLAG,
};

fn agent(flags: u32) -> AgentData {
    AgentData::request(Uuid::from_u128(0x11), Uuid::from_u128(0x22), flags)
}

fn reply_agent() -> ReplyAgentData {
    ReplyAgentData {
        agent_id: Uuid::from_u128(0x11),
        flags: LAYER_FLAG,
    }
}

fn all_messages() -> Vec<Message> {
    vec![
        Message::MapItemRequest(MapItemRequest {
            agent: agent(LAYER_FLAG),
            item_type: 7,
            region_handle: (256_000u64 << 32) | 256_256,
        }),
        Message::MapNameRequest(MapNameRequest {
            agent: agent(LAYER_FLAG),
            name: "Ahern".to_owned(),
        }),
        Message::MapBlockRequest(MapBlockRequest {
            agent: agent(MapBlockRequest::flags_for(true)),
            min_x: 1000,
            min_y: 1000,
            max_x: 1000,
            max_y: 1000,
        }),
        Message::MapBlockReply(MapBlockReply {
            agent: reply_agent(),
            blocks: vec![MapBlockData {
                x: 1000,
                y: 1001,
                name: "Ahern".to_owned(),
                access: 13,
                region_flags: 0,
                image_id: Uuid::from_u128(0xBEEF),
            }],
        }),
        Message::MapItemReply(MapItemReply {
            agent: reply_agent(),
            item_type: 1,
            items: vec![MapItemData {
                x: 256_128,
                y: 256_128,
                name: "Telehub".to_owned(),
                id: Uuid::from_u128(0xCAFE),
                extra: 0,
                extra2: 0,
            }],
        }),
    ]
}

#[test]
fn every_message_survives_the_frame() {
    let limits = Limits::default();
    for message in all_messages() {
        let bytes = message.encode(&limits).unwrap();
        let frame = decode_frame(&bytes, &limits).unwrap();
        assert_eq!(frame.tag(), message.tag());
        assert_eq!(frame.header.payload_len as usize, bytes.len() - HEADER_SIZE);
        assert_eq!(decode_message(&bytes, &limits).unwrap(), message);
    }
}

#[test]
fn request_and_reply_tags_split() {
    let requests: Vec<MessageTag> = all_messages()
        .iter()
        .map(Message::tag)
        .filter(|tag| tag.is_request())
        .collect();
    assert_eq!(
        requests,
        vec![
            MessageTag::MapItemRequest,
            MessageTag::MapNameRequest,
            MessageTag::MapBlockRequest
        ]
    );
}

#[test]
fn empty_block_reply_is_valid() {
    let reply = MapBlockReply {
        agent: reply_agent(),
        blocks: Vec::new(),
    };
    let bytes = reply.encode(&Limits::for_testing()).unwrap();
    let decoded = MapBlockReply::decode(&bytes, &Limits::for_testing()).unwrap();
    assert!(decoded.blocks.is_empty());
}

#[test]
fn reply_flags_are_not_validated_by_the_wire() {
    // Layer validation is a resolver concern; the codec carries any value.
    let reply = MapBlockReply {
        agent: ReplyAgentData {
            agent_id: Uuid::nil(),
            flags: 0x4,
        },
        blocks: Vec::new(),
    };
    let bytes = reply.encode(&Limits::for_testing()).unwrap();
    let decoded = MapBlockReply::decode(&bytes, &Limits::for_testing()).unwrap();
    assert_eq!(decoded.agent.flags, 0x4);
}

#[test]
fn truncated_frames_fail_cleanly() {
    let limits = Limits::default();
    for message in all_messages() {
        let bytes = message.encode(&limits).unwrap();
        for cut in 0..bytes.len() {
            let err = decode_message(&bytes[..cut], &limits).unwrap_err();
            assert!(
                matches!(
                    err,
                    DecodeError::FrameTooSmall { .. } | DecodeError::PayloadLengthMismatch { .. }
                ),
                "cut at {cut} of {} gave {err:?}",
                message.tag()
            );
        }
    }
}
