//! Application use cases and transactions.

mod bus;
mod bus_pass;
mod bus_stop;
mod contractor;
mod dashboard;
mod form;
mod maintenance;
mod metro;
mod route;
mod user;

pub use bus::{bus_create, bus_delete, bus_list, bus_update, BusCreateReq, BusDto, BusUpdateReq};
pub use bus_pass::{
    bus_pass_delete, bus_pass_get, bus_pass_issue, bus_pass_list, BusPassDto, BusPassIssueReq,
    BusPassIssuedDto,
};
pub use bus_stop::{bus_stop_create, bus_stop_list, BusStopCreateReq, BusStopDto};
pub use contractor::{contractor_create, contractor_list, ContractorCreateReq, ContractorDto};
pub use dashboard::{dashboard_stats, DashboardStatsDto};
pub use maintenance::{maintenance_create, maintenance_list, MaintenanceCreateReq, MaintenanceDto};
pub use metro::{
    metro_connection_create, metro_connection_list, metro_stop_create, metro_stop_list,
    MetroConnectionCreateReq, MetroConnectionDto, MetroStopCreateReq, MetroStopDto,
};
pub use route::{
    route_add_stop, route_create, route_delete, route_get, route_list, route_update,
    RouteAddStopReq, RouteCreateReq, RouteDto, RouteListItemDto, RouteUpdateReq,
};
pub use user::{
    user_create, user_delete, user_get, user_list, user_update, UserCreateReq, UserDto,
    UserUpdateReq,
};
