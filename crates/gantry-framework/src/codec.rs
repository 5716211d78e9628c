//! Conversion between protocol messages and the bytes exchanged with the master.
//!
//! Messages travel as libprocess HTTP requests, where the request path names the
//! receiving process and the message type, and the body is the encoded protobuf message.

use prost::Message;

use crate::error::{SchedulerError, SchedulerResult};
use crate::proto::scheduler;

pub const CALL_MESSAGE_NAME: &str = "mesos.scheduler.Call";
pub const EVENT_MESSAGE_NAME: &str = "mesos.scheduler.Event";

/// The name of the master process that receives calls.
pub const MASTER_PROCESS_NAME: &str = "master";

/// The header that identifies the sending process of a libprocess message.
pub const LIBPROCESS_FROM_HEADER: &str = "Libprocess-From";

pub const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

pub fn encode_call(call: &scheduler::Call) -> Vec<u8> {
    call.encode_to_vec()
}

pub fn decode_call(body: &[u8]) -> SchedulerResult<scheduler::Call> {
    Ok(scheduler::Call::decode(body)?)
}

pub fn encode_event(event: &scheduler::Event) -> Vec<u8> {
    event.encode_to_vec()
}

/// Decodes an inbound message addressed by its protobuf message name.
pub fn decode_event(message_name: &str, body: &[u8]) -> SchedulerResult<scheduler::Event> {
    if message_name != EVENT_MESSAGE_NAME {
        return Err(SchedulerError::protocol(format!(
            "unexpected message: {message_name}"
        )));
    }
    Ok(scheduler::Event::decode(body)?)
}

pub fn call_url(master_host: &str, master_port: u16) -> String {
    format!("http://{master_host}:{master_port}/{MASTER_PROCESS_NAME}/{CALL_MESSAGE_NAME}")
}

pub fn libprocess_from(process_name: &str, host: &str, port: u16) -> String {
    format!("{process_name}@{host}:{port}")
}
