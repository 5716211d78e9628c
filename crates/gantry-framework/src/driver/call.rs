use crate::event::{Offer, StatusUpdate};
use crate::id::{FrameworkId, TaskId};
use crate::proto::{mesos, scheduler};

pub(super) fn framework_info(
    user: &str,
    name: &str,
    framework_id: Option<&FrameworkId>,
) -> mesos::FrameworkInfo {
    mesos::FrameworkInfo {
        user: user.to_string(),
        name: name.to_string(),
        id: framework_id.map(mesos::FrameworkId::from),
        ..Default::default()
    }
}

pub(super) fn register(framework_info: mesos::FrameworkInfo) -> scheduler::Call {
    scheduler::Call {
        framework_info,
        r#type: scheduler::call::Type::Register as i32,
        ..Default::default()
    }
}

pub(super) fn launch(
    framework_info: mesos::FrameworkInfo,
    task_id: &TaskId,
    command: String,
    offer: &Offer,
) -> scheduler::Call {
    let task_info = mesos::TaskInfo {
        name: task_id.to_string(),
        task_id: task_id.into(),
        slave_id: (&offer.slave_id).into(),
        resources: offer.resources.clone(),
        command: Some(mesos::CommandInfo {
            value: Some(command),
            shell: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    scheduler::Call {
        framework_info,
        r#type: scheduler::call::Type::Launch as i32,
        launch: Some(scheduler::call::Launch {
            task_infos: vec![task_info],
            offer_ids: vec![(&offer.id).into()],
            filters: None,
        }),
        ..Default::default()
    }
}

pub(super) fn acknowledge(
    framework_info: mesos::FrameworkInfo,
    update: &StatusUpdate,
) -> scheduler::Call {
    scheduler::Call {
        framework_info,
        r#type: scheduler::call::Type::Acknowledge as i32,
        acknowledge: Some(scheduler::call::Acknowledge {
            slave_id: (&update.slave_id).into(),
            task_id: (&update.task_id).into(),
            uuid: update.ack_token.clone(),
        }),
        ..Default::default()
    }
}
