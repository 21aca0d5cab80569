//! Contains the [`Scheduler`] type and the round-robin policy

// Copyright (c) 2025 Ferrous Systems
// SPDX-License-Identifier: GPL-3.0-or-later

use core::sync::atomic::{AtomicPtr, AtomicU32, AtomicUsize, Ordering};

use crate::{Continuation, Task, port};

/// The location of our one and only [`Scheduler`] object.
///
/// We need this so that the free-standing exception handlers know where all
/// our system state is.
pub(crate) static SCHEDULER_PTR: AtomicPtr<Scheduler> = AtomicPtr::new(core::ptr::null_mut());

/// Identifies a Task, by its position in the task list
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TaskId(usize);

impl TaskId {
    /// Represents the Task ID we produce when the scheduler isn't running
    const INVALID_ID: usize = usize::MAX;

    /// The idle task always lives in the first slot
    pub const IDLE: TaskId = TaskId(0);

    /// Is this the invalid Task ID?
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID_ID
    }

    /// Is this the idle task?
    pub const fn is_idle(self) -> bool {
        self.0 == Self::IDLE.0
    }

    /// Get the position of this task in the task list
    pub const fn index(self) -> Option<usize> {
        if self.is_invalid() { None } else { Some(self.0) }
    }

    /// Create an invalid Task ID
    pub(crate) const fn invalid() -> TaskId {
        TaskId(Self::INVALID_ID)
    }
}

impl defmt::Format for TaskId {
    fn format(&self, fmt: defmt::Formatter) {
        if self.is_invalid() {
            defmt::write!(fmt, "T---");
        } else {
            defmt::write!(fmt, "T{=usize:03}", self.0);
        }
    }
}

impl core::fmt::Display for TaskId {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_invalid() {
            write!(fmt, "T---")
        } else {
            write!(fmt, "T{:03}", self.0)
        }
    }
}

/// A pre-emptive, tick-driven, round-robin task scheduler
///
/// Every tick, the task after the current one that is ready gets to run.
/// The task in slot 0 is the idle task, which only runs when every other
/// task is blocked in [`Scheduler::delay`].
///
/// The Arm hardware will push {xPSR, PC, LR, R12, R3, R2, R1, R0} to PSP when
/// an exception occurs. PendSV then pushes the rest (R11 to R4, and the
/// EXC_RETURN value).
pub struct Scheduler {
    /// Which task is currently running
    current_task: AtomicUsize,
    /// A fixed, static list of all our tasks. The first is the idle task.
    task_list: &'static [Task],
    /// Current tick count
    ticks: AtomicU32,
}

impl Scheduler {
    /// This is the minimum stack we can support, because of the state we need to push
    ///
    /// Make space for a [`Continuation`], plus some headroom
    #[cfg(not(arm_abi = "eabihf"))]
    pub const MIN_STACK_SIZE: usize = (4 * Continuation::WORDS) + 8;

    /// This is the minimum stack we can support, because of the state we need to push
    ///
    /// Make space for a [`Continuation`], sixteen high FPU registers pushed
    /// by PendSV, sixteen low FPU registers plus FPSCR and a reserved word
    /// pushed by the hardware, plus some headroom
    #[cfg(arm_abi = "eabihf")]
    pub const MIN_STACK_SIZE: usize = (4 * (Continuation::WORDS + 16 + 18)) + 8;

    /// Build the scheduler
    ///
    /// The first task in the list is the idle task. It must never call
    /// [`delay`](crate::delay) with a non-zero argument, and it should
    /// probably just call [`idle`](crate::idle).
    pub const fn new(task_list: &'static [Task]) -> Scheduler {
        // Cannot schedule without at least an idle task
        assert!(!task_list.is_empty());
        Scheduler {
            task_list,
            current_task: AtomicUsize::new(TaskId::INVALID_ID),
            ticks: AtomicU32::new(0),
        }
    }

    /// Run the scheduler
    ///
    /// You may only call this once, and you should call it from `fn main()`
    /// once all your hardware is configured. We should be in Privileged
    /// Thread mode on the Main stack.
    #[cfg(target_arch = "arm")]
    pub fn start(
        &self,
        mut scb: cortex_m::peripheral::SCB,
        mut syst: cortex_m::peripheral::SYST,
        config: crate::TickConfig,
    ) -> ! {
        use cortex_m::peripheral::scb::SystemHandler;

        /// Somewhere for PendSV to stack the state of `main`, which we then
        /// throw away. Big enough for an extended frame.
        static LAUNCH_STACK: crate::Stack<128> = crate::Stack::new();

        if self.current_task.load(Ordering::SeqCst) != TaskId::INVALID_ID
            || Self::get_scheduler().is_some()
        {
            panic!("Tried to re-start scheduler!");
        }

        // remember where this object is - it cannot move because we do not exit this function
        let self_addr = self as *const Scheduler as *mut Scheduler;
        info!("Scheduler @ {=usize:08x}", self_addr as usize);
        SCHEDULER_PTR.store(self_addr, Ordering::Release);

        #[cfg(not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")))]
        crate::fault::enable_fault_exceptions(&mut scb);

        // PendSV must never pre-empt SysTick, so a task switch never lands
        // in the middle of a tick update
        //
        // SAFETY: we are not in a critical section that relies on the
        // current priorities, because nothing is running yet
        unsafe {
            scb.set_priority(SystemHandler::PendSV, 0xFF);
            scb.set_priority(SystemHandler::SysTick, 0x80);
        }

        self.init_frames();

        // SAFETY: we are in thread mode on the main stack, so PSP is unused,
        // and LAUNCH_STACK is only ever used here
        unsafe {
            port::set_process_stack(LAUNCH_STACK.top());
        }

        // Must do this /after/ setting SCHEDULER_PTR because the SysTick
        // exception handler will use SCHEDULER_PTR
        info!(
            "Ticking at {=u32} Hz (reload {=u32})",
            config.tick_hz(),
            config.reload()
        );
        syst.set_reload(config.reload());
        syst.set_clock_source(cortex_m::peripheral::syst::SystClkSource::Core);
        syst.clear_current();
        syst.enable_counter();
        syst.enable_interrupt();

        // Fire the PendSV exception - the PendSV handler will select a task
        // to run and run it
        debug!("Hit PendSV");
        port::request_switch();
        // flush the pipeline to ensure the PendSV fires before we reach the end of this function
        port::switch_barrier();
        // impossible to get here
        unreachable!();
    }

    /// Fabricate a suspended-task frame at the top of every task's stack
    ///
    /// After this, every task looks like it was interrupted just before the
    /// first instruction of its entry function.
    pub(crate) fn init_frames(&self) {
        for (task_idx, task) in self.task_list.iter().enumerate() {
            let old_stack_top = task.stack();
            info!(
                "Init task frame {=usize}, with stack @ 0x{=usize:08x}",
                task_idx,
                old_stack_top as usize
            );

            let continuation = Continuation::new(task.entry_fn());

            // SAFETY: The task constructor does not let us make tasks with
            // stacks that are too small, and no task is running yet.
            let new_stack = unsafe { continuation.push_onto(old_stack_top) };

            debug!(
                "Fini task frame {=usize}, with stack @ 0x{=usize:08x}",
                task_idx,
                new_stack as usize
            );

            // SAFETY: the pointer we are passing is a validly aligned stack
            // pointer, with a full continuation above it
            unsafe {
                task.set_stack(new_stack);
            }
        }
    }

    /// Call once per tick, from the SysTick handler
    ///
    /// Advances the tick count, unblocks any task whose wake tick is exactly
    /// the new tick count, and asks for a task switch. It does not pick the
    /// next task; PendSV does that.
    pub fn sched_tick(&self) {
        let now = self.advance_ticks();
        trace!("Tick {=u32}", now);

        // The idle task never blocks
        for (task_idx, task) in self.task_list.iter().enumerate().skip(1) {
            if task.wake_if_due(now) {
                trace!("- woke {}", TaskId(task_idx));
            }
        }

        // Harmless if a switch is already pending
        port::request_switch();
    }

    /// Add one to the tick count, returning the new value
    fn advance_ticks(&self) -> u32 {
        #[cfg(not(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base")))]
        let old = self.ticks.fetch_add(1, Ordering::Relaxed);

        #[cfg(any(arm_architecture = "v6-m", arm_architecture = "v8-m.base"))]
        let old = critical_section::with(|_cs| {
            let old = self.ticks.load(Ordering::Relaxed);
            self.ticks.store(old.wrapping_add(1), Ordering::Relaxed);
            old
        });

        old.wrapping_add(1)
    }

    /// Get current tick count
    pub fn now(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Block the current task for `ticks` ticks, and switch to another task
    ///
    /// Returns once the task has been woken and picked to run again, which
    /// happens on tick `now() + ticks`. A zero delay just gives up the rest
    /// of this tick. The idle task cannot block, so a non-zero delay from
    /// the idle task does nothing.
    pub fn delay(&self, ticks: u32) {
        if ticks == 0 {
            trace!("- yield");
            port::request_switch();
            port::switch_barrier();
            return;
        }

        let blocked = critical_section::with(|_cs| {
            let task_id = self.current_task_id();
            let Some(task_idx) = task_id.index() else {
                return None;
            };
            if task_id.is_idle() {
                return None;
            }
            let wake_tick = self.ticks.load(Ordering::Relaxed).wrapping_add(ticks);
            self.task_list[task_idx].block_until(wake_tick);
            port::request_switch();
            Some((task_id, wake_tick))
        });

        if let Some((task_id, wake_tick)) = blocked {
            trace!("- {} blocked until {=u32}", task_id, wake_tick);
            // interrupts are back on, so this is where we get switched out
            port::switch_barrier();
        }
    }

    /// Get the current Task ID
    pub fn current_task_id(&self) -> TaskId {
        TaskId(self.current_task.load(Ordering::Relaxed))
    }

    /// Get the list of tasks we are scheduling
    pub fn task_list(&self) -> &'static [Task] {
        self.task_list
    }

    /// Record where the outgoing task stopped, and pick the incoming task
    ///
    /// Called by PendSV, after it has stacked the outgoing task's
    /// callee-saved registers on to that task's stack. Returns the incoming
    /// task's saved stack pointer, from which PendSV will unstack that
    /// task's callee-saved registers.
    ///
    /// If no task has run yet, `saved_sp` is ignored.
    ///
    /// # Safety
    ///
    /// `saved_sp` must be the current task's stack pointer, with a full
    /// [`Continuation`] above it.
    pub(crate) unsafe fn switch_context(&self, saved_sp: *mut u32) -> *mut u32 {
        let outgoing = self.current_task_id();
        if let Some(task_idx) = outgoing.index() {
            // SAFETY: our caller promised this is a good stack pointer
            unsafe {
                self.task_list[task_idx].set_stack(saved_sp);
            }
        }
        let incoming = self.pick_next_task();
        self.current_task.store(incoming.0, Ordering::Relaxed);
        self.task_list[incoming.0].stack()
    }

    /// Get the handler to the global scheduler
    pub(crate) fn get_scheduler() -> Option<&'static Scheduler> {
        // Get our stashed pointer
        let scheduler_ptr = SCHEDULER_PTR.load(Ordering::Relaxed);
        // Are we intialised?
        if scheduler_ptr.is_null() {
            None
        } else {
            // SAFETY: Only [`Scheduler::start`] writes to [`SCHEDULER_PTR`] and it
            // always sets it to be a valid pointer to a [`Scheduler`] that does not
            // move.
            Some(unsafe { &*scheduler_ptr })
        }
    }

    /// Select the next task in the round-robin
    ///
    /// Masks interrupts so SysTick cannot change a task's state half-way
    /// through the scan.
    fn pick_next_task(&self) -> TaskId {
        let current = self.current_task_id();
        let task_id = critical_section::with(|_cs| select_next(self.task_list, current));
        trace!("{} -> {}", current, task_id);
        task_id
    }
}

/// The scheduling policy: which task should run after `current`?
///
/// Goes through all the tasks, starting with the one after `current` and
/// wrapping around, so the current task is considered last. The first one
/// that is ready, other than the idle task, wins. If none are ready, the
/// idle task wins.
///
/// An invalid `current` (no task has run yet) is treated as the idle task,
/// so the first task to run is task 1.
pub fn select_next(task_list: &[Task], current: TaskId) -> TaskId {
    let num_tasks = task_list.len();
    let current = current.index().unwrap_or(TaskId::IDLE.0);
    for mut idx in (current + 1)..=(current + num_tasks) {
        // do the wrap-around
        while idx >= num_tasks {
            idx -= num_tasks;
        }
        if idx != TaskId::IDLE.0 && task_list[idx].is_ready() {
            return TaskId(idx);
        }
    }
    TaskId::IDLE
}

#[cfg(test)]
mod tests {
    use std::{boxed::Box, vec::Vec};

    use proptest::prelude::*;

    use super::*;
    use crate::{Stack, TaskState};

    fn never_returns() -> ! {
        loop {
            core::hint::spin_loop();
        }
    }

    fn make_tasks(num_tasks: usize) -> &'static [Task] {
        let tasks: Vec<Task> = (0..num_tasks)
            .map(|_| {
                let stack: &'static Stack<256> = Box::leak(Box::new(Stack::new()));
                Task::new(never_returns, stack)
            })
            .collect();
        Box::leak(tasks.into_boxed_slice())
    }

    fn tasks_with_states(ready: &[bool]) -> &'static [Task] {
        let tasks = make_tasks(ready.len());
        for (task, ready) in tasks.iter().zip(ready) {
            if !ready {
                task.block_until(u32::MAX);
            }
        }
        tasks
    }

    /// Take the pending switch, if any, like PendSV would
    fn run_pendsv(scheduler: &Scheduler) -> Option<TaskId> {
        if port::take_switch_request() {
            let current = scheduler.current_task_id();
            let sp = current
                .index()
                .map(|idx| scheduler.task_list[idx].stack())
                .unwrap_or(core::ptr::null_mut());
            unsafe { scheduler.switch_context(sp) };
            Some(scheduler.current_task_id())
        } else {
            None
        }
    }

    fn launch(scheduler: &Scheduler) -> TaskId {
        port::take_switch_request();
        port::request_switch();
        run_pendsv(scheduler).unwrap()
    }

    #[test]
    fn task_one_runs_first() {
        let scheduler = Scheduler::new(make_tasks(3));
        assert!(scheduler.current_task_id().is_invalid());
        assert_eq!(launch(&scheduler), TaskId(1));
    }

    #[test]
    fn ticks_time_slice_ready_tasks() {
        let scheduler = Scheduler::new(make_tasks(3));
        launch(&scheduler);
        let mut order = Vec::new();
        for _ in 0..4 {
            scheduler.sched_tick();
            order.push(run_pendsv(&scheduler).unwrap());
        }
        assert_eq!(order, [TaskId(2), TaskId(1), TaskId(2), TaskId(1)]);
        assert_eq!(scheduler.now(), 4);
    }

    #[test]
    fn a_lone_task_keeps_running() {
        let scheduler = Scheduler::new(make_tasks(2));
        launch(&scheduler);
        scheduler.sched_tick();
        assert_eq!(run_pendsv(&scheduler), Some(TaskId(1)));
    }

    #[test]
    fn only_idle_means_idle_runs() {
        let scheduler = Scheduler::new(make_tasks(1));
        assert_eq!(launch(&scheduler), TaskId::IDLE);
        scheduler.sched_tick();
        assert_eq!(run_pendsv(&scheduler), Some(TaskId::IDLE));
    }

    #[test]
    fn switch_requests_do_not_stack_up() {
        let scheduler = Scheduler::new(make_tasks(3));
        launch(&scheduler);
        scheduler.sched_tick();
        scheduler.sched_tick();
        port::request_switch();
        assert!(port::is_switch_pending());
        assert_eq!(run_pendsv(&scheduler), Some(TaskId(2)));
        assert_eq!(run_pendsv(&scheduler), None);
        assert_eq!(scheduler.current_task_id(), TaskId(2));
    }

    #[test]
    fn switch_saves_outgoing_stack_pointer() {
        let tasks = make_tasks(3);
        let scheduler = Scheduler::new(tasks);
        scheduler.init_frames();
        launch(&scheduler);
        let task_one_sp = tasks[1].stack();
        let pretend_sp = unsafe { task_one_sp.sub(8) };
        let next_sp = unsafe { scheduler.switch_context(pretend_sp) };
        assert_eq!(tasks[1].stack(), pretend_sp);
        assert_eq!(next_sp, tasks[2].stack());
        assert_eq!(scheduler.current_task_id(), TaskId(2));
    }

    #[test]
    fn every_task_gets_a_frame() {
        let tasks = make_tasks(5);
        let tops: Vec<*mut u32> = tasks.iter().map(Task::stack).collect();
        let scheduler = Scheduler::new(tasks);
        scheduler.init_frames();
        for (task, top) in tasks.iter().zip(tops) {
            assert_eq!(task.stack(), unsafe { top.sub(Continuation::WORDS) });
            let (continuation, sp) = unsafe { Continuation::restore_from(task.stack()) };
            assert_eq!(sp, top);
            assert_eq!(continuation.pc, task.entry_fn() as usize as u32);
            assert_eq!(continuation.callee_saved, [0; 8]);
            assert_eq!(continuation.args, [0; 4]);
            assert!(continuation.is_thumb());
            assert!(task.is_ready());
        }
    }

    #[test]
    fn delay_blocks_until_exact_tick() {
        let tasks = make_tasks(3);
        let scheduler = Scheduler::new(tasks);
        launch(&scheduler);
        scheduler.sched_tick();
        assert_eq!(run_pendsv(&scheduler), Some(TaskId(2)));
        scheduler.sched_tick();
        assert_eq!(run_pendsv(&scheduler), Some(TaskId(1)));

        // T001 delays for 3 ticks at tick 2
        scheduler.delay(3);
        assert_eq!(tasks[1].state(), TaskState::Blocked);
        assert_eq!(tasks[1].wake_tick(), 5);
        assert_eq!(run_pendsv(&scheduler), Some(TaskId(2)));

        for _ in 3..5 {
            scheduler.sched_tick();
            assert_eq!(run_pendsv(&scheduler), Some(TaskId(2)));
        }
        scheduler.sched_tick();
        assert_eq!(scheduler.now(), 5);
        assert!(tasks[1].is_ready());
        assert_eq!(run_pendsv(&scheduler), Some(TaskId(1)));
    }

    #[test]
    fn delay_survives_tick_wrap() {
        let tasks = make_tasks(2);
        let scheduler = Scheduler::new(tasks);
        scheduler.ticks.store(u32::MAX - 1, Ordering::Relaxed);
        launch(&scheduler);
        scheduler.delay(4);
        assert_eq!(tasks[1].wake_tick(), 2);
        assert_eq!(run_pendsv(&scheduler), Some(TaskId::IDLE));
        for _ in 0..3 {
            scheduler.sched_tick();
            assert_eq!(run_pendsv(&scheduler), Some(TaskId::IDLE));
        }
        scheduler.sched_tick();
        assert_eq!(scheduler.now(), 2);
        assert_eq!(run_pendsv(&scheduler), Some(TaskId(1)));
    }

    #[test]
    fn zero_delay_is_a_yield() {
        let tasks = make_tasks(3);
        let scheduler = Scheduler::new(tasks);
        launch(&scheduler);
        scheduler.delay(0);
        assert!(tasks[1].is_ready());
        assert_eq!(run_pendsv(&scheduler), Some(TaskId(2)));
    }

    #[test]
    fn idle_cannot_block() {
        let tasks = make_tasks(2);
        let scheduler = Scheduler::new(tasks);
        launch(&scheduler);
        scheduler.delay(10);
        assert_eq!(run_pendsv(&scheduler), Some(TaskId::IDLE));

        scheduler.delay(10);
        assert!(tasks[0].is_ready());
        assert!(!port::is_switch_pending());
    }

    #[test]
    fn delay_before_start_does_nothing() {
        let tasks = make_tasks(2);
        let scheduler = Scheduler::new(tasks);
        port::take_switch_request();
        scheduler.delay(10);
        assert!(tasks.iter().all(Task::is_ready));
        assert!(!port::is_switch_pending());
    }

    #[test]
    fn all_blocked_selects_idle_from_anywhere() {
        let tasks = tasks_with_states(&[true, false, false, false, false]);
        for idx in 0..tasks.len() {
            assert_eq!(select_next(tasks, TaskId(idx)), TaskId::IDLE);
        }
        assert_eq!(select_next(tasks, TaskId::invalid()), TaskId::IDLE);
    }

    #[test]
    fn idle_is_skipped_when_others_are_ready() {
        let tasks = tasks_with_states(&[true, false, true, false, false]);
        for idx in 0..tasks.len() {
            assert_eq!(select_next(tasks, TaskId(idx)), TaskId(2));
        }
    }

    #[test]
    fn round_robin_visits_every_ready_task_in_order() {
        let tasks = tasks_with_states(&[true, true, false, true, true, false]);
        let mut current = TaskId(3);
        let mut visited = Vec::new();
        for _ in 0..6 {
            current = select_next(tasks, current);
            visited.push(current.0);
        }
        assert_eq!(visited, [4, 1, 3, 4, 1, 3]);
    }

    /// Half-periods of the four LED tasks on the STM32F4-Discovery
    const HALF_PERIODS: [u32; 5] = [0, 1000, 500, 250, 125];

    /// Run every task that gets picked until we land in idle. Each task body
    /// is "toggle the LED, then delay".
    fn run_until_idle(
        scheduler: &Scheduler,
        toggles: &mut [u32; 5],
        blocked_at: &mut [Option<u32>; 5],
    ) {
        while let Some(task_id) = run_pendsv(scheduler) {
            let task_idx = task_id.index().unwrap();
            if task_id.is_idle() {
                assert!(scheduler.task_list.iter().skip(1).all(|t| !t.is_ready()));
                break;
            }
            if let Some(since) = blocked_at[task_idx] {
                assert_eq!(scheduler.now(), since + HALF_PERIODS[task_idx]);
            }
            toggles[task_idx] += 1;
            blocked_at[task_idx] = Some(scheduler.now());
            scheduler.delay(HALF_PERIODS[task_idx]);
        }
    }

    /// Count how many tasks moved between Ready and Blocked since we last
    /// looked
    fn count_state_changes(
        scheduler: &Scheduler,
        last: &mut [TaskState; 5],
        changes: &mut [u32; 5],
    ) {
        for (idx, task) in scheduler.task_list.iter().enumerate() {
            let state = task.state();
            if state != last[idx] {
                changes[idx] += 1;
                last[idx] = state;
            }
        }
    }

    #[test]
    fn led_blinker_scenario() {
        let scheduler = Scheduler::new(make_tasks(5));
        scheduler.init_frames();
        let mut toggles = [0u32; 5];
        let mut blocked_at = [None; 5];

        port::take_switch_request();
        port::request_switch();
        run_until_idle(&scheduler, &mut toggles, &mut blocked_at);
        assert_eq!(toggles, [0, 1, 1, 1, 1]);

        let mut last = [TaskState::Blocked; 5];
        last[0] = TaskState::Ready;
        for (task, state) in scheduler.task_list.iter().zip(last) {
            assert_eq!(task.state(), state);
        }
        let mut changes = [0u32; 5];

        for _ in 0..1000 {
            scheduler.sched_tick();
            count_state_changes(&scheduler, &mut last, &mut changes);
            run_until_idle(&scheduler, &mut toggles, &mut blocked_at);
            count_state_changes(&scheduler, &mut last, &mut changes);
            assert!(!scheduler.current_task_id().is_invalid());
        }

        assert_eq!(scheduler.now(), 1000);
        // each wake and each re-block is one change of state
        assert_eq!(changes, [0, 2, 4, 8, 16]);
        // the LEDs were also toggled once at tick 0
        assert_eq!(toggles, [0, 2, 3, 5, 9]);
    }

    proptest! {
        #[test]
        fn selection_is_nearest_ready_task(
            ready in proptest::collection::vec(any::<bool>(), 1..12),
            current in 0usize..12,
        ) {
            let mut ready = ready;
            ready[0] = true;
            let current = current % ready.len();
            let tasks = tasks_with_states(&ready);

            let chosen = select_next(tasks, TaskId(current)).index().unwrap();

            let any_ready = ready.iter().skip(1).any(|r| *r);
            prop_assert_eq!(chosen == 0, !any_ready);
            prop_assert!(tasks[chosen].is_ready());
            if chosen != 0 {
                // nothing ready lies strictly between current and chosen
                let distance = (chosen + ready.len() - current - 1) % ready.len();
                for step in 1..=distance {
                    let idx = (current + step) % ready.len();
                    prop_assert!(idx == 0 || !ready[idx]);
                }
            }
        }
    }
}

// End of File
